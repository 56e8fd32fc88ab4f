// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_linked_line(links: usize) -> String {
    let mut line = String::new();
    for i in 0..links {
        line.push_str(&format!(
            "See [[note-{i}|Note {i}]] and [doc {i}](docs/page%20{i}.md) or https://example.com/{i} then "
        ));
    }
    line
}

/// A run of openers with no closing bracket anywhere on the line.
#[allow(dead_code)]
pub fn generate_bracket_soup(size: usize) -> String {
    "[".repeat(size)
}

/// Markdown openers whose destinations never close.
#[allow(dead_code)]
pub fn generate_unclosed_destinations(size: usize) -> String {
    "[a](".repeat(size)
}
