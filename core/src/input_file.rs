pub const INPUT_FILE_SUFFIX: &str = ".txt";

pub fn is_puzzle_input_name(name: &str) -> bool {
    name.ends_with(INPUT_FILE_SUFFIX)
}

// First run of ASCII digits in `name`, parsed. `input07.txt` gives 7.
pub fn day_hint(name: &str) -> Option<i32> {
    let start = name.find(|ch: char| ch.is_ascii_digit())?;
    let rest = &name[start..];
    let len = rest
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..len].parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSource {
    Item,
    FileList,
}

pub fn resolve_drop(item_count: Option<u32>, file_count: Option<u32>) -> Option<DropSource> {
    if item_count == Some(1) {
        return Some(DropSource::Item);
    }
    if file_count == Some(1) {
        return Some(DropSource::FileList);
    }
    None
}
