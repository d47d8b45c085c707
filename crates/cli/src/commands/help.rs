pub fn run() {
    println!("Available commands:");
    println!();
    println!("  -version          Show version information");
    println!("  -help             Show this help message");
    println!("  -edit-config      Open config file in editor");
    println!("  -show-config      Display current configuration");
    println!("  -validate-config  Validate configuration file");
    println!("  -list-labels      Show the label alphabet [--query Q --file F]");
    println!("  -search           Preview a search --query Q [--file F] [--json]");
}
