//! Terminal post picker

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

use halo_sync_core::traits::PostPicker;
use halo_sync_core::types::PickItem;

/// Prints a numbered list and reads the choice from stdin.
pub struct TerminalPicker;

/// Index chosen by `input` among `len` items; 1-based on the terminal.
fn parse_selection(input: &str, len: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

#[async_trait]
impl PostPicker for TerminalPicker {
    async fn pick(&self, items: &[PickItem]) -> Option<i64> {
        if items.is_empty() {
            println!("The blog has no posts.");
            return None;
        }

        let width = items.len().to_string().len();
        for (i, item) in items.iter().enumerate() {
            println!("{:>width$}. {}  ({})", i + 1, item.label, item.description);
        }
        println!("Select a post [1-{}], anything else cancels:", items.len());

        let mut line = String::new();
        let mut stdin = BufReader::new(tokio::io::stdin());
        if let Err(e) = stdin.read_line(&mut line).await {
            tracing::warn!("Failed to read selection: {e}");
            return None;
        }
        parse_selection(&line, items.len()).map(|i| items[i].id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_one_based_and_bounded() {
        assert_eq!(parse_selection("1\n", 3), Some(0));
        assert_eq!(parse_selection(" 3 ", 3), Some(2));
        assert_eq!(parse_selection("0", 3), None);
        assert_eq!(parse_selection("4", 3), None);
        assert_eq!(parse_selection("", 3), None);
        assert_eq!(parse_selection("q", 3), None);
    }
}
