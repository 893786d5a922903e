use std::path::{Path, PathBuf};

use asm8::{error::Error, list, util, view::Format, Config};
use color_print::cprintln;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// YAML file with default options
    #[clap(short, long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Assemble a source file into a hex image
    Assemble {
        input: PathBuf,

        /// Output file [default: <input>.hex]
        #[clap(short, long)]
        output: Option<PathBuf>,

        /// Dump assembly listing
        #[clap(short, long)]
        dump: bool,
    },

    /// Turn a hex image back into assembly
    Disassemble {
        input: PathBuf,

        /// Output file [default: <input>.asm]
        #[clap(short, long)]
        output: Option<PathBuf>,

        /// Annotate every line with its instruction address
        #[clap(short = 'a', long)]
        show_address: bool,

        /// Column of the address comment
        #[clap(short, long)]
        padding: Option<usize>,
    },

    /// Print the instructions at an address range of a hex image
    View {
        input: PathBuf,

        /// First address (inclusive)
        start: u32,

        /// Last address (exclusive)
        end: Option<u32>,

        /// assembly | hex | binary | decimal
        #[clap(short, long)]
        format: Option<Format>,
    },

    /// List the instruction set
    List {
        /// Print as YAML
        #[clap(long)]
        yaml: bool,
    },
}

fn with_extension(input: &Path, ext: &str) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

fn run(args: Args) -> Result<(), (Error, PathBuf)> {
    let config = match &args.config {
        Some(path) => Config::load(path).map_err(|e| (e, path.clone()))?,
        None => Config::default(),
    };

    match args.command {
        Command::Assemble {
            input,
            output,
            dump,
        } => {
            let output = output.unwrap_or_else(|| with_extension(&input, "hex"));
            println!("1. Read Files and Parse Lines");
            println!("  < {}", input.display());
            println!("2. Generate Binary");
            println!("  > {}", output.display());
            asm8::assemble(&input, &output).map_err(|e| (e, input.clone()))?;
            if dump {
                let source = std::fs::read_to_string(&input)
                    .map_err(|e| (Error::from_io(&input, e), input.clone()))?;
                util::print_dump(&input.display().to_string(), &source);
            }
        }
        Command::Disassemble {
            input,
            output,
            show_address,
            padding,
        } => {
            let output = output.unwrap_or_else(|| with_extension(&input, "asm"));
            let opts = config.disassemble;
            let show_address = show_address || opts.show_address;
            let padding = padding.unwrap_or(opts.padding);
            println!("1. Read Records");
            println!("  < {}", input.display());
            println!("2. Write Assembly");
            println!("  > {}", output.display());
            asm8::disassemble(&input, &output, show_address, padding)
                .map_err(|e| (e, input.clone()))?;
        }
        Command::View {
            input,
            start,
            end,
            format,
        } => {
            let format = format.unwrap_or(config.view.format);
            let lines = asm8::view(&input, start, end, format).map_err(|e| (e, input.clone()))?;
            for (offset, line) in lines.iter().enumerate() {
                cprintln!("<y>0x{:04X}</>  {}", start as usize + offset, line);
            }
        }
        Command::List { yaml } => {
            if yaml {
                print!("{}", list::list_yaml());
            } else {
                for inst in arch8::Inst::all() {
                    println!("{}", inst.cformat());
                }
            }
        }
    }
    Ok(())
}

fn main() {
    use clap::Parser;

    let args = Args::parse();
    if let Err((err, file)) = run(args) {
        err.print_diag(&file.display().to_string());
        std::process::exit(1);
    }
}
