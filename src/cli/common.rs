//! Output helpers shared by CLI commands.

pub fn print_success(msg: &str) {
    println!("\u{2713} {}", msg);
}

pub fn print_error(msg: &str) {
    eprintln!("\u{2717} {}", msg);
}

pub fn print_info(msg: &str) {
    println!("\u{2139}\u{FE0F} {}", msg);
}
