use std::io::Write;

use crossterm::{cursor, queue, style, terminal};

/// Print one key hint such as `"[Space] pause"`.
///
/// Bracketed segments are the keys and print bold; the description prints dim.
pub fn print_hint<W: Write>(out: &mut W, hint: &str) -> std::io::Result<()> {
    let mut rest = hint;
    while let Some(open) = rest.find('[') {
        let Some(len) = rest[open..].find(']') else {
            break;
        };
        dim(out, &rest[..open])?;
        queue!(
            out,
            style::SetAttribute(style::Attribute::Bold),
            style::Print(&rest[open..=open + len]),
            style::SetAttribute(style::Attribute::Reset),
        )?;
        rest = &rest[open + len + 1..];
    }
    dim(out, rest)
}

fn dim<W: Write>(out: &mut W, text: &str) -> std::io::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    queue!(
        out,
        style::SetAttribute(style::Attribute::Dim),
        style::Print(text),
        style::SetAttribute(style::Attribute::Reset),
    )
}

/// Clear row `y` and print the hints across it, two spaces apart.
pub fn print_bar<W: Write>(out: &mut W, y: u16, hints: &[String]) -> std::io::Result<()> {
    queue!(
        out,
        cursor::MoveTo(0, y),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(" "),
    )?;
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            queue!(out, style::Print("  "))?;
        }
        print_hint(out, hint)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printed(hint: &str) -> String {
        let mut out = Vec::new();
        print_hint(&mut out, hint).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn keeps_all_text() {
        let out = printed("[l] faster [j] slower");
        assert!(out.contains("[l]"));
        assert!(out.contains(" faster "));
        assert!(out.contains("[j]"));
        assert!(out.contains(" slower"));
    }

    #[test]
    fn unclosed_bracket_is_plain_text() {
        assert!(printed("[Space pause").contains("[Space pause"));
    }
}
