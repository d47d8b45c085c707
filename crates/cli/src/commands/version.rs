pub fn run() {
    println!("flashcopy-cli {}", env!("CARGO_PKG_VERSION"));
}
