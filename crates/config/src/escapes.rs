/// Decodes the escape spellings people use for colour codes in config files:
/// `\033` (octal), `\e`, `\x1b`, `\u001b`, and `\\`. Anything else after a
/// backslash is kept verbatim.
pub fn decode_escapes(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '\\' || i + 1 >= chars.len() {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let next = chars[i + 1];
        let decoded = match next {
            'e' | 'E' => Some(('\x1b', 2)),
            '\\' => Some(('\\', 2)),
            '0'..='7' => radix_escape(&chars[i + 1..], 8, 3).map(|(c, len)| (c, len + 1)),
            'x' => radix_escape(&chars[i + 2..], 16, 2).map(|(c, len)| (c, len + 2)),
            'u' => radix_escape(&chars[i + 2..], 16, 4).map(|(c, len)| (c, len + 2)),
            _ => None,
        };

        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                i += consumed;
            }
            None => {
                out.push('\\');
                i += 1;
            }
        }
    }

    out
}

fn radix_escape(digits: &[char], radix: u32, max_len: usize) -> Option<(char, usize)> {
    let len = digits
        .iter()
        .take(max_len)
        .take_while(|c| c.is_digit(radix))
        .count();
    if len == 0 {
        return None;
    }
    let text: String = digits[..len].iter().collect();
    let code = u32::from_str_radix(&text, radix).ok()?;
    char::from_u32(code).map(|c| (c, len))
}

#[cfg(test)]
mod tests {
    use super::decode_escapes;

    #[test]
    fn decodes_common_escape_spellings() {
        assert_eq!(decode_escapes(r"\033[1;33m"), "\x1b[1;33m");
        assert_eq!(decode_escapes(r"\e[1m"), "\x1b[1m");
        assert_eq!(decode_escapes(r"\x1b[32m"), "\x1b[32m");
        assert_eq!(decode_escapes(r"\x1B[32m"), "\x1b[32m");
        assert_eq!(decode_escapes(r"\u001b[0m"), "\x1b[0m");
    }

    #[test]
    fn keeps_unknown_escapes_and_plain_text() {
        assert_eq!(decode_escapes(r"a\qb"), r"a\qb");
        assert_eq!(decode_escapes(r"\\e"), r"\e");
        assert_eq!(decode_escapes("trailing\\"), "trailing\\");
        assert_eq!(decode_escapes("\x1b[1m"), "\x1b[1m");
        assert_eq!(decode_escapes(r"\xzz"), r"\xzz");
    }
}
