use std::process::ExitCode;

use janus::grammars::{assignment, declaration, statements};
use janus::{parse, render, Codec, Error};

const SAMPLES: &[&str] = &[
    r#"let x = "hi";"#,
    r#"let greeting="hello, world";"#,
    "n = 42;",
    r#"s = "0" ;"#,
];

fn check<C>(codec: &C, text: &str) -> Result<(), Error>
where
    C: Codec,
    C::Value: PartialEq + Clone + std::fmt::Debug,
{
    let value = parse(codec, text)?;
    let rendered = render(codec, &value)?;
    println!("{text:?}\n  => {value:?}\n  => {rendered:?}");
    Ok(())
}

fn run(args: &[String]) -> Result<(), Error> {
    let grammar = statements()?;
    if args.is_empty() {
        let (decl, assign) = (declaration()?, assignment()?);
        check(&decl, SAMPLES[0])?;
        check(&decl, SAMPLES[1])?;
        check(&assign, SAMPLES[2])?;
        check(&assign, SAMPLES[3])?;
        check(&grammar, &SAMPLES.join("\n"))?;
    } else {
        for arg in args {
            check(&grammar, arg)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
