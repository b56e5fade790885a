//! Prompt loop that dispatches each accepted request as a background run.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use rayon::ThreadPoolBuilder;
use reportsplit_io_fs::calculate_worker_limit;
use reportsplit_segment::{EnumReportType, SpecSplitOptions};

use crate::commands::{format_split_success, run_split};

/// Keyword that ends the loop.
pub const C_KEYWORD_EXIT: &str = "quit";
/// File path prompt.
pub const C_PROMPT_FILE: &str = "Enter xlsx file location :";
/// Sheet name prompt.
pub const C_PROMPT_SHEET: &str = "Enter the sheet name";
/// Concurrent background runs.
const N_WORKERS_INTERACTIVE: usize = 2;

/// What one pass through the prompts produced.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumPromptOutcome {
    /// A complete parse request.
    Request(SpecSplitOptions),
    /// Unrecognized keyword, echoed back to the user.
    Invalid(String),
    /// `quit` or end of input.
    Exit,
}

/// Print `prompt`, then read one trimmed line; `None` at end of input.
pub fn read_input_with_prompt<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    writeln!(writer, "{prompt}")?;
    writer.flush()?;

    let mut c_line = String::new();
    if reader.read_line(&mut c_line)? == 0 {
        return Ok(None);
    }
    Ok(Some(c_line.trim().to_string()))
}

/// Keyword prompt listing every report type.
pub fn derive_type_prompt() -> String {
    let l_keywords: Vec<&str> = EnumReportType::ALL.iter().map(|t| t.keyword()).collect();
    let (c_last, l_head) = match l_keywords.split_last() {
        Some((last, head)) => (*last, head.join(", ")),
        None => ("", String::new()),
    };
    format!(
        "To parse a report, enter {l_head}, or {c_last} (type {C_KEYWORD_EXIT} to exit) :"
    )
}

/// Run the keyword, file and sheet prompts once.
pub fn read_next_request<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> io::Result<EnumPromptOutcome> {
    let Some(c_keyword) = read_input_with_prompt(reader, writer, &derive_type_prompt())? else {
        return Ok(EnumPromptOutcome::Exit);
    };
    if c_keyword == C_KEYWORD_EXIT {
        return Ok(EnumPromptOutcome::Exit);
    }
    let Ok(report_type) = c_keyword.parse::<EnumReportType>() else {
        return Ok(EnumPromptOutcome::Invalid(c_keyword));
    };

    let Some(c_file) = read_input_with_prompt(reader, writer, C_PROMPT_FILE)? else {
        return Ok(EnumPromptOutcome::Exit);
    };
    let Some(c_sheet) = read_input_with_prompt(reader, writer, C_PROMPT_SHEET)? else {
        return Ok(EnumPromptOutcome::Exit);
    };
    Ok(EnumPromptOutcome::Request(SpecSplitOptions::from_input(
        &c_file,
        &c_sheet,
        report_type,
    )))
}

/// Prompt until `quit`/EOF, running each request in the background.
///
/// Returns once every dispatched run has finished. Falls back to running
/// requests inline when the worker pool cannot be built.
pub fn run_interactive<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<usize> {
    let n_workers = calculate_worker_limit(Some(N_WORKERS_INTERACTIVE));
    let thread_pool = ThreadPoolBuilder::new()
        .num_threads(n_workers)
        .thread_name(|idx| format!("reportsplit-run-{idx}"))
        .build();
    let Ok(thread_pool) = thread_pool else {
        tracing::warn!(workers = n_workers, "thread pool unavailable; fallback to serial runs");
        return run_prompt_loop(reader, writer, |options| run_request(&options));
    };

    thread_pool.in_place_scope(|scope| {
        run_prompt_loop(reader, writer, |options| {
            scope.spawn(move |_| run_request(&options));
        })
    })
}

fn run_prompt_loop<R: BufRead, W: Write, F: FnMut(SpecSplitOptions)>(
    reader: &mut R,
    writer: &mut W,
    mut dispatch: F,
) -> Result<usize> {
    let mut n_dispatched = 0usize;
    loop {
        match read_next_request(reader, writer)? {
            EnumPromptOutcome::Exit => break,
            EnumPromptOutcome::Invalid(c_keyword) => {
                writeln!(writer, "{c_keyword} is not a valid command")?;
            }
            EnumPromptOutcome::Request(options) => {
                writeln!(
                    writer,
                    "working on {} in the background",
                    options.path_file_source.display()
                )?;
                n_dispatched += 1;
                dispatch(options);
            }
        }
    }
    tracing::debug!(requests = n_dispatched, "prompt loop closed");
    Ok(n_dispatched)
}

fn run_request(options: &SpecSplitOptions) {
    match run_split(options) {
        Ok(report) => println!("{}", format_split_success(&report)),
        Err(err) => println!("{err:#}"),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn read_next_request_collects_file_and_sheet() {
        let mut reader = Cursor::new("month\n reports/june \nSheet1\n");
        let mut writer: Vec<u8> = Vec::new();

        let outcome = read_next_request(&mut reader, &mut writer).expect("prompt");
        match outcome {
            EnumPromptOutcome::Request(options) => {
                assert_eq!(options.report_type, EnumReportType::Month);
                assert_eq!(options.path_file_source, PathBuf::from("reports/june.xlsx"));
                assert_eq!(options.sheet_name, "Sheet1");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        let c_out = String::from_utf8(writer).expect("utf8");
        assert!(c_out.contains(C_PROMPT_FILE));
        assert!(c_out.contains(C_PROMPT_SHEET));
    }

    #[test]
    fn read_next_request_flags_unknown_keyword() {
        let mut reader = Cursor::new("weekly\n");
        let mut writer: Vec<u8> = Vec::new();
        assert_eq!(
            read_next_request(&mut reader, &mut writer).expect("prompt"),
            EnumPromptOutcome::Invalid("weekly".to_string())
        );
    }

    #[test]
    fn read_next_request_exits_on_quit_and_eof() {
        let mut writer: Vec<u8> = Vec::new();
        assert_eq!(
            read_next_request(&mut Cursor::new("quit\n"), &mut writer).expect("quit"),
            EnumPromptOutcome::Exit
        );
        assert_eq!(
            read_next_request(&mut Cursor::new(""), &mut writer).expect("eof"),
            EnumPromptOutcome::Exit
        );
        assert_eq!(
            read_next_request(&mut Cursor::new("annual\nbook.xlsx\n"), &mut writer)
                .expect("eof mid request"),
            EnumPromptOutcome::Exit
        );
    }

    #[test]
    fn type_prompt_lists_keywords() {
        assert_eq!(
            derive_type_prompt(),
            "To parse a report, enter annual, month, shift, statement, or credit (type quit to exit) :"
        );
    }

    #[test]
    fn run_interactive_waits_for_dispatched_runs() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_missing = tmp.path().join("missing");
        let c_input = format!(
            "weekly\nmonth\n{}\nSheet1\nquit\n",
            path_missing.to_string_lossy()
        );
        let mut reader = Cursor::new(c_input);
        let mut writer: Vec<u8> = Vec::new();

        let n_dispatched = run_interactive(&mut reader, &mut writer).expect("loop");
        assert_eq!(n_dispatched, 1);

        let c_out = String::from_utf8(writer).expect("utf8");
        assert!(c_out.contains("weekly is not a valid command"));
        assert!(c_out.contains("in the background"));
        assert!(!tmp.path().join("missing_output").exists());
    }
}
