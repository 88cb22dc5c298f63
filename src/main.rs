use anyhow::{anyhow, Result};
use lox::{run_file, run_prompt};
use std::{env, path::Path};

mod lox;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        println!("usage: treelox [script]");
        return Err(anyhow!("invalid arguments"));
    } else if args.len() == 2 {
        run_file(Path::new(&args[1]))?;
    } else {
        run_prompt()?;
    }

    Ok(())
}
