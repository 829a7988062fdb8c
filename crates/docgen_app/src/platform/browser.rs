use std::io;
use std::process::{Child, Command, ExitStatus};
use std::thread::{self, JoinHandle};

/// Opens `url` with the platform's default handler in a new window or tab.
pub fn open_in_browser(url: &str) -> io::Result<()> {
    #[cfg(target_os = "windows")]
    let child = Command::new("cmd").args(["/C", "start", "", url]).spawn()?;

    #[cfg(target_os = "macos")]
    let child = Command::new("open").arg(url).spawn()?;

    #[cfg(all(unix, not(target_os = "macos")))]
    let child = Command::new("xdg-open").arg(url).spawn()?;

    // The launcher returns quickly; waiting off-thread keeps it from lingering
    // as a zombie.
    drop(reap_in_background(child));
    Ok(())
}

fn reap_in_background(mut child: Child) -> JoinHandle<io::Result<ExitStatus>> {
    thread::spawn(move || child.wait())
}
