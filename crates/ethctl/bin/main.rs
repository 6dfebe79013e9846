fn main() {
    if ethctl::args::run().is_err() {
        std::process::exit(1);
    }
}
