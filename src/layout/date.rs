//! `%d{...}` options are written the Java way (`yyyy-MM-dd HH:mm:ss,SSS`) in most existing
//! configurations; chrono wants strftime. Options that already contain `%` are taken as strftime.

/// Translates a `SimpleDateFormat`-style pattern (or one of the named log4j formats) to strftime.
#[must_use]
pub fn java_to_strftime(pattern: &str) -> String {
    match pattern.trim() {
        "ISO8601" => return "%Y-%m-%d %H:%M:%S,%3f".to_string(),
        "ABSOLUTE" => return "%H:%M:%S,%3f".to_string(),
        "DATE" => return "%d %b %Y %H:%M:%S,%3f".to_string(),
        p if p.contains('%') => return p.to_string(),
        _ => {}
    }

    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            // `''` is an escaped quote, otherwise a quoted literal runs to the next quote.
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            i += 1;
            while i < chars.len() {
                if chars[i] == '\'' {
                    if chars.get(i + 1) == Some(&'\'') {
                        out.push('\'');
                        i += 2;
                        continue;
                    }
                    break;
                }
                out.push(chars[i]);
                i += 1;
            }
            i += 1;
            continue;
        }

        if !c.is_ascii_alphabetic() {
            out.push(c);
            i += 1;
            continue;
        }

        let run = chars[i..].iter().take_while(|&&x| x == c).count();
        let strftime = match (c, run) {
            ('y', 2) => "%y",
            ('y', _) => "%Y",
            ('M', 1 | 2) => "%m",
            ('M', 3) => "%b",
            ('M', _) => "%B",
            ('d', _) => "%d",
            ('H', _) => "%H",
            ('h', _) => "%I",
            ('m', _) => "%M",
            ('s', _) => "%S",
            ('S', _) => "%3f",
            ('a', _) => "%p",
            ('E', 1..=3) => "%a",
            ('E', _) => "%A",
            ('z' | 'Z', _) => "%z",
            _ => "",
        };
        if strftime.is_empty() {
            out.extend(std::iter::repeat_n(c, run));
        } else {
            out.push_str(strftime);
        }
        i += run;
    }

    out
}
