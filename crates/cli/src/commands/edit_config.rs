use anyhow::Result;
use flashcopy_config::ensure_config_file;
use std::process::Command;

pub fn run() -> Result<()> {
    // Creates the commented default config on first use
    let path = ensure_config_file()?;

    println!("Opening {}", path.display());

    // Try $EDITOR first, then platform-specific fallbacks
    if let Ok(editor) = std::env::var("EDITOR") {
        let status = Command::new(&editor).arg(&path).status();

        match status {
            Ok(s) if s.success() => return Ok(()),
            Ok(_) => eprintln!("Editor exited with error"),
            Err(e) => eprintln!("Failed to run {}: {}", editor, e),
        }
    }

    #[cfg(target_os = "macos")]
    {
        let _ = Command::new("open").arg("-t").arg(&path).status();
    }

    #[cfg(target_os = "linux")]
    {
        for editor in &["nano", "vim", "vi"] {
            if Command::new(editor).arg(&path).status().is_ok() {
                return Ok(());
            }
        }
    }

    #[cfg(target_os = "windows")]
    {
        let _ = Command::new("notepad").arg(&path).status();
    }

    Ok(())
}
