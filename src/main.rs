fn main() {
    deltas_setup::app::cli::run();
}
