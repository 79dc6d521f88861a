use logprinter::fmt::MAX_WIDTH;
use logprinter::{Arg, FormatError, sprintf};
use std::net::Ipv4Addr;

#[test]
fn substitutes_positional_arguments() {
    let out = sprintf("%s=%d", &[Arg::from("retries"), Arg::from(3)]).unwrap();
    assert_eq!(out, "retries=3");
}

#[test]
fn no_arguments_leaves_template_untouched() {
    assert_eq!(sprintf("100% done, %d left", &[]).unwrap(), "100% done, %d left");
}

#[test]
fn extra_arguments_are_ignored() {
    let out = sprintf("only %s", &[Arg::from("one"), Arg::from(2)]).unwrap();
    assert_eq!(out, "only one");
}

#[test]
fn width_justification_and_zero_padding() {
    let out = sprintf("%5d|%-5d|%05d", &[Arg::from(42), Arg::from(42), Arg::from(42)]).unwrap();
    assert_eq!(out, "   42|42   |00042");
}

#[test]
fn zero_padding_goes_after_the_sign() {
    assert_eq!(sprintf("%05d", &[Arg::from(-42)]).unwrap(), "-0042");
    assert_eq!(sprintf("%+d", &[Arg::from(5)]).unwrap(), "+5");
}

#[test]
fn radix_conversions() {
    let out = sprintf("%x %X %o", &[Arg::from(255u32), Arg::from(255u32), Arg::from(255u32)]).unwrap();
    assert_eq!(out, "ff FF 377");
}

#[test]
fn negative_radix_uses_the_source_type_width() {
    assert_eq!(sprintf("%x", &[Arg::from(-1i32)]).unwrap(), "ffffffff");
    assert_eq!(sprintf("%X", &[Arg::from(-2i8)]).unwrap(), "FE");
    assert_eq!(sprintf("%o", &[Arg::from(-1i16)]).unwrap(), "177777");
    assert_eq!(sprintf("%x", &[Arg::from(-1i64)]).unwrap(), "ffffffffffffffff");
}

#[test]
fn float_precision_and_width() {
    assert_eq!(sprintf("%.2f", &[Arg::from(1.23456)]).unwrap(), "1.23");
    assert_eq!(sprintf("%f", &[Arg::from(0.5)]).unwrap(), "0.500000");
    assert_eq!(sprintf("%10.3f", &[Arg::from(-1.5)]).unwrap(), "    -1.500");
}

#[test]
fn exponent_uses_signed_two_digit_exponent() {
    assert_eq!(sprintf("%e", &[Arg::from(1234.5)]).unwrap(), "1.234500e+03");
    assert_eq!(sprintf("%.1E", &[Arg::from(0.001)]).unwrap(), "1.0E-03");
}

#[test]
fn strings_truncate_and_uppercase() {
    assert_eq!(sprintf("%.3s", &[Arg::from("abcdef")]).unwrap(), "abc");
    assert_eq!(sprintf("%S", &[Arg::from("net")]).unwrap(), "NET");
    assert_eq!(sprintf("%-6s|", &[Arg::from("ab")]).unwrap(), "ab    |");
}

#[test]
fn booleans_and_chars() {
    assert_eq!(sprintf("%b %b", &[Arg::from(false), Arg::from("x")]).unwrap(), "false true");
    assert_eq!(sprintf("%c%c", &[Arg::from('z'), Arg::from(65)]).unwrap(), "zA");
}

#[test]
fn explicit_argument_index() {
    let out = sprintf("%2$s %1$s", &[Arg::from("world"), Arg::from("hello")]).unwrap();
    assert_eq!(out, "hello world");
}

#[test]
fn literal_percent_and_newline() {
    assert_eq!(sprintf("%d%%%n", &[Arg::from(99)]).unwrap(), "99%\n");
}

#[test]
fn display_arguments_render_through_s() {
    let out = sprintf("peer %s", &[Arg::display(&Ipv4Addr::LOCALHOST)]).unwrap();
    assert_eq!(out, "peer 127.0.0.1");
}

#[test]
fn integer_conversion_rejects_strings() {
    let err = sprintf("%d", &[Arg::from("x")]).unwrap_err();
    assert_eq!(
        err,
        FormatError::Mismatch {
            conversion: 'd',
            found: "string"
        }
    );
}

#[test]
fn float_conversion_rejects_integers() {
    assert!(matches!(
        sprintf("%.2f", &[Arg::from(1)]),
        Err(FormatError::Mismatch { conversion: 'f', .. })
    ));
}

#[test]
fn missing_argument_reports_its_position() {
    let err = sprintf("%s and %s", &[Arg::from("one")]).unwrap_err();
    assert_eq!(err, FormatError::MissingArgument(2));
}

#[test]
fn unknown_conversion_is_a_fault() {
    let err = sprintf("%q", &[Arg::from(1)]).unwrap_err();
    assert_eq!(err, FormatError::UnknownConversion('q'));
}

#[test]
fn dangling_percent_is_a_fault() {
    assert_eq!(sprintf("50 %", &[Arg::from(1)]).unwrap_err(), FormatError::Dangling);
}

#[test]
fn oversized_width_or_precision_is_a_fault() {
    let one = [Arg::from("x")];
    assert_eq!(
        sprintf("%999999999999s", &one).unwrap_err(),
        FormatError::TooWide(999_999_999_999)
    );
    assert_eq!(
        sprintf("%.5000s", &one).unwrap_err(),
        FormatError::TooWide(5000)
    );
    assert!(matches!(
        sprintf("%99999999999999999999999999s", &one),
        Err(FormatError::TooWide(_))
    ));

    let widest = sprintf(&format!("%{MAX_WIDTH}s"), &one).unwrap();
    assert_eq!(widest.len(), MAX_WIDTH);
}
