//! Console report helpers shared by the pipelines.

const RULE_WIDTH: usize = 60;

pub fn header(title: &str) {
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("{title}");
    println!("{}", "=".repeat(RULE_WIDTH));
}

pub fn section(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "-".repeat(title.chars().count()));
}

pub fn success(message: impl AsRef<str>) {
    println!("✓ {}", message.as_ref());
}

pub fn warning(message: impl AsRef<str>) {
    println!("⚠ {}", message.as_ref());
}

pub fn failure(message: impl AsRef<str>) {
    println!("✗ {}", message.as_ref());
}

pub fn info(message: impl AsRef<str>) {
    println!("ℹ {}", message.as_ref());
}
