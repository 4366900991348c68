// Command line front end: builds a register from flags or a JSON config and
// generates, analyzes or dumps its sequence.
//
//   lfsr --width 32 --taps 0x80200003 --seed 1 \
//       generate --count 5 --include-seed
//   lfsr --config reg.json period --max-steps 4294967296
//   RUST_LOG=debug lfsr --width 8 --taps 0xB8 balance --count 255
use clap::{Parser, Subcommand, ValueEnum};
use lfsr_rs::analysis::{
    output_bit_balance, run_lengths, AnalysisError, OutputMode, PeriodStrategy,
    SeedConvention, SequenceAnalyzer,
};
use lfsr_rs::config::{parse_word, LfsrConfig};
use lfsr_rs::io::raw::{PackedBitSink, WordSink};
use lfsr_rs::io::text::HexLineSink;
use lfsr_rs::io::{Driver, Sink};
use lfsr_rs::lfsr::Topology;
use lfsr_rs::Error;
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

#[derive(ValueEnum, Debug, Clone, Copy)]
enum TopologyArg {
    FibonacciLeft,
    FibonacciRight,
    Galois,
}

impl From<TopologyArg> for Topology {
    fn from(arg: TopologyArg) -> Self {
        match arg {
            TopologyArg::FibonacciLeft => Topology::FibonacciLeft,
            TopologyArg::FibonacciRight => Topology::FibonacciRight,
            TopologyArg::Galois => Topology::Galois,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Format {
    /// `step_index, 0x<state>` lines
    Hex,
    /// Little-endian 64 bit words
    Raw,
    /// Output bits packed eight to a byte
    Packed,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum StrategyArg {
    Auto,
    Visited,
    Brent,
}

impl From<StrategyArg> for PeriodStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Auto => PeriodStrategy::Auto,
            StrategyArg::Visited => PeriodStrategy::Visited,
            StrategyArg::Brent => PeriodStrategy::Brent,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clock the register and write out what it produces
    Generate {
        #[arg(long, default_value_t = 100)]
        count: usize,

        /// Emit only the low bit of each state
        #[arg(long)]
        bits: bool,

        /// Emit the seed as the first value
        #[arg(long)]
        include_seed: bool,

        #[arg(long, value_enum, default_value_t = Format::Hex)]
        format: Format,

        /// Write here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Find the cycle reached from the seed
    Period {
        #[arg(long, default_value_t = 1 << 32)]
        max_steps: u64,

        #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
        strategy: StrategyArg,
    },
    /// Report the share of one bits and the run length histogram
    Balance {
        #[arg(long, default_value_t = 1000)]
        count: usize,
    },
}

#[derive(Parser, Debug)]
#[command(name = "lfsr", about = "Linear-feedback shift register sequences")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON file with width, taps, seed and optionally topology. Overrides
    /// the register flags.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 32)]
    width: u32,

    #[arg(long, value_parser = parse_word, default_value = "0x80200003")]
    taps: u64,

    #[arg(long, value_parser = parse_word, default_value = "1")]
    seed: u64,

    #[arg(long, value_enum, default_value_t = TopologyArg::FibonacciLeft)]
    topology: TopologyArg,
}

fn open_output(path: &Option<PathBuf>) -> Result<Box<dyn Write>, Error> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = match cli.config {
        Some(ref path) => LfsrConfig::from_path(path)?,
        None => LfsrConfig::new(cli.width, cli.taps, cli.seed)
            .with_topology(cli.topology.into()),
    };
    info!("register config: {:?}", config);
    let mut core = config.build()?;

    match cli.command {
        Command::Generate {
            count,
            bits,
            include_seed,
            format,
            output,
        } => {
            let mode = if bits {
                OutputMode::Bits
            } else {
                OutputMode::States
            };
            let convention = if include_seed {
                SeedConvention::Include
            } else {
                SeedConvention::Exclude
            };
            let analyzer = SequenceAnalyzer::new()
                .output_mode(mode)
                .seed_convention(convention);
            let writer = open_output(&output)?;
            let mut sink: Box<dyn Sink<u64>> = match format {
                Format::Hex => Box::new(HexLineSink::new(writer, config.width)),
                Format::Raw => Box::new(WordSink::new(writer)),
                Format::Packed => Box::new(PackedBitSink::new(writer)),
            };
            let mut driver = Driver::new(analyzer);
            driver.run(&mut core, count, &mut *sink)?;
            sink.finish()?;
        }
        Command::Period {
            max_steps,
            strategy,
        } => {
            let analyzer = SequenceAnalyzer::new().strategy(strategy.into());
            match analyzer.find_period(&mut core, max_steps) {
                Ok(info) => {
                    println!("cycle_length: {}", info.cycle_length);
                    println!("maximal: {}", info.maximal);
                    println!("offset: {}", info.offset);
                }
                Err(AnalysisError::PeriodNotFound { max_steps }) => {
                    println!(
                        "no period within {} steps, \
                         retry with a larger --max-steps",
                        max_steps
                    );
                    process::exit(2);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::Balance { count } => {
            let analyzer =
                SequenceAnalyzer::new().output_mode(OutputMode::Bits);
            let record = analyzer.generate(&mut core, count);
            match output_bit_balance(&record) {
                Some(ratio) => println!("ones: {:.6}", ratio),
                None => println!("ones: n/a"),
            }
            for (length, runs) in run_lengths(&record) {
                println!("run {}: {}", length, runs);
            }
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("lfsr: {}", err);
        process::exit(1);
    }
}
