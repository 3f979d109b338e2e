use mipsgen::cli::Cli;
use mipsgen::generator::Generator;

fn main() {
    let cli = Cli::parse();

    let mut generator = Generator::new(cli.max_instr, cli.seed);
    let program = generator.generate(cli.level).join("\n");

    match &cli.output {
        Some(path) => {
            if let Err(err) = std::fs::write(path, format!("{program}\n")) {
                eprintln!("Error writing {}: {}", path.display(), err);
                std::process::exit(1);
            }
        }
        None => println!("{}", program),
    }
}
