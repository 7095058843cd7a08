use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::{self, Read};
use vg5000_float::{add, decode, encode, EncodedFloat};

#[derive(Parser, Debug)]
#[command(name = "vg5000-float")]
#[command(about = "Encode, decode and add VG5000 BASIC 4-byte floats", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode decimal values; prints the wire bytes in hex and in binary.
    Encode {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },
    /// Decode wire-order hex records (e.g. "cc cc 4c 7d" or cccc4c7d).
    Decode {
        #[arg(required = true, value_name = "HEX")]
        codes: Vec<EncodedFloat>,
    },
    /// Add two operands in the encoded domain.
    Add {
        #[arg(allow_negative_numbers = true)]
        a: String,
        #[arg(allow_negative_numbers = true)]
        b: String,
        /// Treat operands as hex records instead of decimal values.
        #[arg(long, default_value_t = false)]
        hex: bool,
    },
    /// Read a JSON array of requests from stdin and write a JSON array of results.
    Batch,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "op", rename_all = "lowercase")]
enum Request {
    Encode { value: f64 },
    Decode { code: EncodedFloat },
    Add { a: EncodedFloat, b: EncodedFloat },
}

#[derive(Serialize, Debug, Default)]
struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<EncodedFloat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Response {
    fn from_code(code: EncodedFloat) -> Self {
        Self {
            code: Some(code),
            value: Some(decode(code)),
            error: None,
        }
    }

    fn from_error(err: impl ToString) -> Self {
        Self {
            error: Some(err.to_string()),
            ..Self::default()
        }
    }
}

fn handle(request: Request) -> Response {
    let result = match request {
        Request::Encode { value } => encode(value),
        Request::Decode { code } => Ok(code),
        Request::Add { a, b } => add(a, b),
    };
    match result {
        Ok(code) => Response::from_code(code),
        Err(err) => Response::from_error(err),
    }
}

fn run_batch(input: &str) -> Result<String> {
    let requests: Vec<Request> =
        serde_json::from_str(input).context("batch input must be a JSON array of requests")?;
    let responses: Vec<Response> = requests.into_iter().map(handle).collect();
    Ok(serde_json::to_string(&responses)?)
}

fn parse_operand(raw: &str, hex: bool) -> Result<EncodedFloat> {
    if hex {
        return raw
            .parse::<EncodedFloat>()
            .with_context(|| format!("could not parse hex record '{raw}'"));
    }
    let value = raw
        .trim()
        .parse::<f64>()
        .with_context(|| format!("could not parse value '{raw}'"))?;
    Ok(encode(value)?)
}

fn code_lines(code: EncodedFloat, value: f64) -> [String; 2] {
    [
        format!("Code : {code}, Value : {value}"),
        format!("Code : {code:b}, Value : {value}"),
    ]
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Encode { values } => {
            for value in values {
                let code = encode(value)?;
                for line in code_lines(code, value) {
                    println!("{line}");
                }
            }
        }
        Command::Decode { codes } => {
            for code in codes {
                println!("Code : {code}, Value : {}", decode(code));
            }
        }
        Command::Add { a, b, hex } => {
            let lhs = parse_operand(&a, hex)?;
            let rhs = parse_operand(&b, hex)?;
            let sum = add(lhs, rhs)?;
            println!("Code : {sum}, Value : {}", decode(sum));
        }
        Command::Batch => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            println!("{}", run_batch(&buffer)?);
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("fatal: {err:#}");
        std::process::exit(1);
    }
}
