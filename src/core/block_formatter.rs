use std::fmt::Display;

pub const DELIMITER_WIDTH: usize = 80;

pub fn delimiter() -> String {
    "=".repeat(DELIMITER_WIDTH)
}

/// Renders one collected file:
///
/// ```text
/// \n<delimiter>\nFILE: <path>\n<delimiter>\n\n<contents>\n\n
/// ```
pub fn format_file_block(relative_path: &str, contents: &str) -> String {
    let rule = delimiter();
    let mut block =
        String::with_capacity(contents.len() + relative_path.len() + 2 * rule.len() + 16);

    block.push('\n');
    block.push_str(&rule);
    block.push('\n');
    block.push_str("FILE: ");
    block.push_str(relative_path);
    block.push('\n');
    block.push_str(&rule);
    block.push_str("\n\n");
    block.push_str(contents);
    block.push_str("\n\n");

    block
}

pub fn format_read_failure(relative_path: &str, error: impl Display) -> String {
    format!("Could not read file {}: {}\n", relative_path, error)
}
