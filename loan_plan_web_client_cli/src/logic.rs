use crate::{DEFAULT_BASE_URL, GENERATE_PLAN_PATH};
use loan_plan_common::cli::constants::*;
use loan_plan_common::cli::helpers::*;
use loan_plan_common::types::PeriodRecord;
use loan_plan_common::CliType;
use reqwest::{Client, StatusCode, Url};
use std::error::Error;

pub async fn main_loop(base_url: Url) -> Result<(), Box<dyn Error>> {
    run(&base_url, || read_from_stdin(PROMPT)).await
}

/// **Runs commands until `quit` or the end of input**
///
/// A failed request is reported and the loop goes on.
///
/// Wrapped by `main_loop()` so we can unit-test it with scripted input.
async fn run(
    base_url: &Url,
    mut next_input: impl FnMut() -> Input,
) -> Result<(), Box<dyn Error>> {
    let client = Client::new();

    loop {
        match next_input() {
            Input::Line(line) => {
                let words = line.split_whitespace().collect::<Vec<_>>();
                let cmd = words[0].to_lowercase();

                match cmd.as_str() {
                    HELP | "h" => help(CliType::Web),
                    PLAN | "p" => {
                        if let Err(err) = plan(&words, &client, base_url).await {
                            eprintln!("[ERROR] {}", err);
                        }
                    }
                    QUIT | "q" => break,
                    _ => println!("Unrecognized command; try `help`."),
                }
            }
            Input::Empty => continue,
            Input::Eof => break,
        }
    }

    Ok(())
}

/// **Get base URL**
///
/// Tries to create a URL from the provided argument.
///
/// If that is not possible, falls back to a default.
///
/// It returns a URL in any case.
///
/// This is meant to be a base URL for all operations.
///
/// - If the provided argument is the `None` variant,
///   returns a default value as the base URL.
/// - If it's a `String`, tries to parse it into URL.
///   - If it's a valid URL string, returns it as URL.
///   - If it's a malformed URL string, returns the default.
///
/// The default value is [`DEFAULT_BASE_URL`].
pub fn get_base_url(base_url: Option<String>) -> Url {
    let default = || Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL");

    let base_url = match base_url {
        Some(base_url) => base_url,
        None => {
            println!(
                "No CLI base URL provided; using default: {}",
                DEFAULT_BASE_URL
            );
            return default();
        }
    };

    Url::parse(base_url.as_str()).unwrap_or_else(|_| {
        println!(
            "Provided base URL could not be parsed; using default: {}",
            DEFAULT_BASE_URL
        );
        default()
    })
}

/// **Request an amortization schedule from the web service**
///
/// `plan <amount> <nominal rate %> <months> <start date>`
///
/// The words are parsed locally, so a typo never reaches the service;
/// the values themselves are validated by the service.
///
/// Prints the schedule, or the service's error message.
///
/// # Errors
/// Only transport errors are returned: the service being unreachable,
/// or a response that isn't a schedule. The caller reports them.
async fn plan(words: &[&str], client: &Client, base_url: &Url) -> Result<(), Box<dyn Error>> {
    let request = match parse_plan_args(words) {
        Ok(request) => request,
        Err(err) => {
            eprintln!("[ERROR] {}", err);
            return Ok(());
        }
    };

    let url = base_url.join(GENERATE_PLAN_PATH)?;
    let response = client.post(url).json(&request).send().await?;

    if response.status() == StatusCode::OK {
        let schedule: Vec<PeriodRecord> = response.json().await?;
        print_schedule(&schedule);
    } else {
        eprintln!("[ERROR] \"{}\"", response.text().await?);
    }

    Ok(())
}
