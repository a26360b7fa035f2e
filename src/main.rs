fn main() {
    #[cfg(feature = "cli")]
    bootstring::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("bootstring: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
