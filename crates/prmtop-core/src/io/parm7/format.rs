use super::error::Parm7Error;

/// Field type letter from a `%FORMAT` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `a` — character data.
    Character,
    /// `i` — integer.
    Integer,
    /// `f` — fixed-point float.
    Fixed,
    /// `e` — exponential float.
    Exponential,
}

impl FieldKind {
    fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'a' => Some(Self::Character),
            'i' => Some(Self::Integer),
            'f' => Some(Self::Fixed),
            'e' => Some(Self::Exponential),
            _ => None,
        }
    }
}

/// A decoded `%FORMAT(<count><type><width>[.<decimals>])` directive.
///
/// `count` is the number of fields per full data line and `width` the fixed
/// number of characters each field occupies. Decimal places are declared for
/// float formats but play no role in decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub count: usize,
    pub kind: FieldKind,
    pub width: usize,
}

fn leading_digits(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s.split_at(end)
}

/// Parses the parenthesized body of a `%FORMAT` line into a [`FormatSpec`].
pub fn parse_format_line(line: &str) -> Result<FormatSpec, Parm7Error> {
    let malformed = || Parm7Error::MalformedFormat {
        line: line.to_string(),
    };

    let open = line.find('(').ok_or_else(malformed)?;
    let close = line[open + 1..]
        .find(')')
        .map(|offset| open + 1 + offset)
        .ok_or_else(malformed)?;
    let body = &line[open + 1..close];

    let (count_digits, rest) = leading_digits(body);
    let count: usize = count_digits.parse().map_err(|_| malformed())?;
    if count == 0 {
        return Err(malformed());
    }

    let letter = rest.chars().next().ok_or_else(malformed)?;
    let kind = FieldKind::from_letter(letter).ok_or_else(malformed)?;

    let (width_digits, _) = leading_digits(&rest[letter.len_utf8()..]);
    let width: usize = width_digits.parse().map_err(|_| malformed())?;
    if width == 0 {
        return Err(malformed());
    }

    Ok(FormatSpec { count, kind, width })
}

/// Strict integer conversion of a trimmed field. Blank fields yield `None`,
/// as does any text that fails to parse; callers distinguish the two.
pub fn to_int(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

/// Float conversion of a trimmed field, normalizing Fortran-style `D`/`d`
/// exponent markers to `E` first.
pub fn to_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.contains(['D', 'd']) {
        let normalized: String = trimmed
            .chars()
            .map(|c| if c == 'D' || c == 'd' { 'E' } else { c })
            .collect();
        normalized.parse().ok()
    } else {
        trimmed.parse().ok()
    }
}

/// Number of fields actually present on a data line: the declared per-line
/// count, capped by how many `width`-sized columns the line can hold (a
/// section's final line is often a short, partial row).
fn fields_on_line(line: &str, spec: &FormatSpec) -> usize {
    if spec.width == 0 {
        return 0;
    }
    spec.count.min(1.max(line.len().div_ceil(spec.width)))
}

fn field(line: &str, idx: usize, width: usize) -> Option<&str> {
    let start = idx * width;
    if start >= line.len() {
        return None;
    }
    let end = (start + width).min(line.len());
    line.get(start..end)
}

/// Appends each field of `line` as a trimmed string, up to `limit` total
/// entries in `out`.
pub(crate) fn append_strings(
    line: &str,
    spec: &FormatSpec,
    out: &mut Vec<String>,
    limit: Option<usize>,
) {
    let limit = limit.unwrap_or(usize::MAX);
    if out.len() >= limit {
        return;
    }
    for idx in 0..fields_on_line(line, spec) {
        if out.len() >= limit {
            break;
        }
        let Some(raw) = field(line, idx, spec.width) else {
            break;
        };
        out.push(raw.trim().to_string());
    }
}

/// Appends each integer field of `line`, transformed by `map`, up to `limit`
/// total entries in `out`. Blank fields are skipped; non-blank fields that
/// fail to parse abort the parse naming `section`.
pub(crate) fn append_ints_with<F>(
    line: &str,
    spec: &FormatSpec,
    out: &mut Vec<i32>,
    limit: Option<usize>,
    section: &'static str,
    map: F,
) -> Result<(), Parm7Error>
where
    F: Fn(i32) -> i32,
{
    let limit = limit.unwrap_or(usize::MAX);
    if out.len() >= limit || line.is_empty() {
        return Ok(());
    }
    for idx in 0..fields_on_line(line, spec) {
        if out.len() >= limit {
            break;
        }
        let Some(raw) = field(line, idx, spec.width) else {
            break;
        };
        match to_int(raw) {
            Some(value) => out.push(map(value)),
            None if raw.trim().is_empty() => continue,
            None => {
                return Err(Parm7Error::InvalidInt {
                    section,
                    value: raw.to_string(),
                });
            }
        }
    }
    Ok(())
}

pub(crate) fn append_ints(
    line: &str,
    spec: &FormatSpec,
    out: &mut Vec<i32>,
    limit: Option<usize>,
    section: &'static str,
) -> Result<(), Parm7Error> {
    append_ints_with(line, spec, out, limit, section, |value| value)
}

/// Float counterpart of [`append_ints_with`].
pub(crate) fn append_floats_with<F>(
    line: &str,
    spec: &FormatSpec,
    out: &mut Vec<f64>,
    limit: Option<usize>,
    section: &'static str,
    map: F,
) -> Result<(), Parm7Error>
where
    F: Fn(f64) -> f64,
{
    let limit = limit.unwrap_or(usize::MAX);
    if out.len() >= limit || line.is_empty() {
        return Ok(());
    }
    for idx in 0..fields_on_line(line, spec) {
        if out.len() >= limit {
            break;
        }
        let Some(raw) = field(line, idx, spec.width) else {
            break;
        };
        match to_float(raw) {
            Some(value) => out.push(map(value)),
            None if raw.trim().is_empty() => continue,
            None => {
                return Err(Parm7Error::InvalidFloat {
                    section,
                    value: raw.to_string(),
                });
            }
        }
    }
    Ok(())
}

pub(crate) fn append_floats(
    line: &str,
    spec: &FormatSpec,
    out: &mut Vec<f64>,
    limit: Option<usize>,
    section: &'static str,
) -> Result<(), Parm7Error> {
    append_floats_with(line, spec, out, limit, section, |value| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_format_line_decodes_integer_directive() {
        let spec = parse_format_line("%FORMAT(10I8)").unwrap();
        assert_eq!(spec.count, 10);
        assert_eq!(spec.kind, FieldKind::Integer);
        assert_eq!(spec.width, 8);
    }

    #[test]
    fn parse_format_line_decodes_character_and_float_directives() {
        let spec = parse_format_line("%FORMAT(20a4)").unwrap();
        assert_eq!(spec.count, 20);
        assert_eq!(spec.kind, FieldKind::Character);
        assert_eq!(spec.width, 4);

        let spec = parse_format_line("%FORMAT(5E16.8)").unwrap();
        assert_eq!(spec.count, 5);
        assert_eq!(spec.kind, FieldKind::Exponential);
        assert_eq!(spec.width, 16);

        let spec = parse_format_line("%FORMAT(3F10.4)").unwrap();
        assert_eq!(spec.kind, FieldKind::Fixed);
        assert_eq!(spec.width, 10);
    }

    #[test]
    fn parse_format_line_rejects_malformed_directives() {
        for line in [
            "%FORMAT 10I8",
            "%FORMAT(10I8",
            "%FORMAT()",
            "%FORMAT(I8)",
            "%FORMAT(10)",
            "%FORMAT(10I)",
            "%FORMAT(0I8)",
            "%FORMAT(10I0)",
            "%FORMAT(10X8)",
        ] {
            let result = parse_format_line(line);
            assert!(
                matches!(result, Err(Parm7Error::MalformedFormat { .. })),
                "expected failure for {line:?}"
            );
        }
    }

    #[test]
    fn to_float_normalizes_fortran_exponents() {
        assert_eq!(to_float(" 1.5D+01 "), Some(15.0));
        assert_eq!(to_float("-2.0d-01"), Some(-0.2));
        assert_eq!(to_float(" 3.25E+00"), Some(3.25));
        assert_eq!(to_float("garbage"), None);
        assert_eq!(to_float("   "), None);
    }

    #[test]
    fn to_int_requires_strict_decimal_text() {
        assert_eq!(to_int("  42"), Some(42));
        assert_eq!(to_int("-7 "), Some(-7));
        assert_eq!(to_int("4.2"), None);
        assert_eq!(to_int(""), None);
    }

    fn int_spec(count: usize, width: usize) -> FormatSpec {
        FormatSpec {
            count,
            kind: FieldKind::Integer,
            width,
        }
    }

    #[test]
    fn append_ints_slices_fixed_width_columns() {
        let mut out = Vec::new();
        append_ints("       1       2       3", &int_spec(10, 8), &mut out, None, "TEST").unwrap();
        assert_eq!(out, vec![1, 2, 3]);
    }

    #[test]
    fn append_ints_honors_the_remaining_capacity_limit() {
        let mut out = Vec::new();
        append_ints(
            "       1       2       3",
            &int_spec(10, 8),
            &mut out,
            Some(2),
            "TEST",
        )
        .unwrap();
        assert_eq!(out, vec![1, 2]);
    }

    #[test]
    fn append_ints_skips_blank_fields_without_error() {
        let line = format!("{:>8}{:>8}{:>8}", 1, "", 99);
        let mut out = Vec::new();
        append_ints(&line, &int_spec(10, 8), &mut out, None, "TEST").unwrap();
        assert_eq!(out, vec![1, 99]);
    }

    #[test]
    fn append_ints_reports_the_owning_section_on_bad_text() {
        let mut out = Vec::new();
        let result = append_ints("     abc", &int_spec(10, 8), &mut out, None, "JOIN_ARRAY");
        match result {
            Err(Parm7Error::InvalidInt { section, value }) => {
                assert_eq!(section, "JOIN_ARRAY");
                assert_eq!(value.trim(), "abc");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn append_floats_applies_the_value_transform() {
        let spec = FormatSpec {
            count: 5,
            kind: FieldKind::Exponential,
            width: 16,
        };
        let mut out = Vec::new();
        append_floats_with(
            "  1.00000000E+01  2.00000000E+01",
            &spec,
            &mut out,
            None,
            "CHARGE",
            |value| value / 2.0,
        )
        .unwrap();
        assert_eq!(out, vec![5.0, 10.0]);
    }

    #[test]
    fn append_strings_keeps_short_final_rows() {
        let spec = FormatSpec {
            count: 20,
            kind: FieldKind::Character,
            width: 4,
        };
        let mut out = Vec::new();
        append_strings("N1  C1  O", &spec, &mut out, None);
        assert_eq!(out, vec!["N1", "C1", "O"]);
    }
}
