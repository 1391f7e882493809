fn main() {
    if let Err(err) = decision_flowchart::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
