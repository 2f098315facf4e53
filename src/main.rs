fn main() -> Result<(), Box<dyn std::error::Error>> {
    chatmark::cli::main()
}
