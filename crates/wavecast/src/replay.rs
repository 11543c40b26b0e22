use anyhow::{Context, Error};
use std::io::{BufRead, Write};
use wavecast_core::navigation::Action;
use wavecast_core::NavigationHost;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Breadcrumb,
    Json,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub commands: usize,
    pub changes: usize,
    pub rejected: usize,
}

fn parse_command(line: &str) -> Option<Action> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    if line.eq_ignore_ascii_case("back") {
        Some(Action::Back)
    } else {
        Some(Action::Open(line.to_string()))
    }
}

fn print_backstack<W: Write>(
    host: &NavigationHost,
    out: &mut W,
    format: Format,
) -> Result<(), Error> {
    match format {
        Format::Breadcrumb => writeln!(out, "{}", host.stack().breadcrumb(" > "))?,
        Format::Json => {
            serde_json::to_writer(&mut *out, host.backstack())
                .context("can't serialize backstack")?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Applies every command of `input` to `host`, printing the backstack after
/// each one. Invalid links are reported on stderr and skipped.
pub fn replay<R: BufRead, W: Write>(
    host: &mut NavigationHost,
    input: R,
    mut out: W,
    format: Format,
) -> Result<Summary, Error> {
    let mut summary = Summary::default();

    for (number, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("can't read script line {}", number + 1))?;
        let Some(action) = parse_command(&line) else {
            continue;
        };

        summary.commands += 1;
        match host.handle(action) {
            Ok(true) => summary.changes += 1,
            Ok(false) => {}
            Err(e) => {
                summary.rejected += 1;
                eprintln!("line {}: {}", number + 1, e);
            }
        }

        print_backstack(host, &mut out, format)?;
    }

    out.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavecast_core::DeepLinkResolver;

    fn run(script: &str, format: Format) -> (Summary, String) {
        let mut host = NavigationHost::new(DeepLinkResolver::default(), None);
        let mut out = Vec::new();
        let summary = replay(&mut host, script.as_bytes(), &mut out, format).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_replay_prints_breadcrumb_per_command() {
        let script = "\
# open an episode from explore
wavecast://explore
wavecast://episode/1?podcast=1

wavecast://podcast/1
wavecast://episode/1?podcast=1
back
";
        let (summary, output) = run(script, Format::Breadcrumb);

        assert_eq!(
            summary,
            Summary {
                commands: 5,
                changes: 5,
                rejected: 0,
            }
        );
        assert_eq!(
            output.lines().collect::<Vec<_>>(),
            vec![
                "Home > Explore",
                "Home > Explore > Episode 1",
                "Home > Explore > Episode 1 > Podcast 1",
                "Home > Explore > Episode 1",
                "Home > Explore",
            ]
        );
    }

    #[test]
    fn test_replay_counts_rejected_links_and_noops() {
        let script = "wavecast://charts\nBACK\nwavecast://library\nwavecast://library\n";
        let (summary, output) = run(script, Format::Breadcrumb);

        assert_eq!(summary.commands, 4);
        assert_eq!(summary.changes, 1);
        assert_eq!(summary.rejected, 1);
        assert_eq!(output.lines().last(), Some("Home > Library"));
    }

    #[test]
    fn test_replay_json_output() {
        let (_, output) = run("wavecast://review/2025\n", Format::Json);
        assert_eq!(
            output.trim(),
            r#"[{"route":"home"},{"route":"year-in-review","year":2025}]"#
        );
    }
}
