fn main() {
    if let Err(e) = coachlite::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
