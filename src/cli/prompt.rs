//! Interactive prompts for values missing from the command line.

use std::io::{BufRead, Write};

use console::style;

use crate::config::BrowserKind;
use crate::error::{Error, Result};

fn read_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{} ", style(prompt).bold())?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(Error::Aborted("input closed".into()));
    }
    Ok(line.trim().to_string())
}

/// Ask which browser to use. Anything but a valid menu number selects the default.
pub fn prompt_browser<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<BrowserKind> {
    writeln!(output, "Select a browser:")?;
    for (i, kind) in BrowserKind::ALL.iter().enumerate() {
        writeln!(output, "  {}. {}", i + 1, kind)?;
    }

    let answer = read_line(
        input,
        output,
        &format!("Choice [1-{}, default {}]:", BrowserKind::ALL.len(), BrowserKind::default()),
    )?;
    Ok(BrowserKind::from_menu_choice(&answer))
}

/// Ask for the profile base URL.
pub fn prompt_url<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    let answer = read_line(input, output, "Profile URL (https://fapello.com/<profile>/):")?;
    if answer.is_empty() {
        return Err(Error::Aborted("no URL given".into()));
    }
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_browser() {
        let mut out = Vec::new();
        let kind = prompt_browser(&mut Cursor::new("1\n"), &mut out).unwrap();
        assert_eq!(kind, BrowserKind::Brave);

        let menu = String::from_utf8(out).unwrap();
        assert!(menu.contains("1. Brave"));
        assert!(menu.contains("4. Edge"));
    }

    #[test]
    fn test_prompt_browser_invalid_uses_default() {
        let kind = prompt_browser(&mut Cursor::new("banana\n"), &mut Vec::new()).unwrap();
        assert_eq!(kind, BrowserKind::Chrome);
    }

    #[test]
    fn test_prompt_url() {
        let url = prompt_url(
            &mut Cursor::new("  https://fapello.com/someuser/ \n"),
            &mut Vec::new(),
        )
        .unwrap();
        assert_eq!(url, "https://fapello.com/someuser/");
    }

    #[test]
    fn test_prompt_url_eof_aborts() {
        let err = prompt_url(&mut Cursor::new(""), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, Error::Aborted(_)));
    }
}
