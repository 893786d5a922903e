use asm8::token::{TokenKind, TokenKind::*};

fn assert(code: &str, expect: TokenKind, text: &str) {
    use asm8::lexer::LineLexer;
    let tokens = LineLexer::new(code, 1).parse();
    assert_eq!(tokens[0].kind, expect);
    assert_eq!(tokens[0].text, text);
}

macro_rules! case {
    ($name:ident, $code:expr, $expect:expr, $text:expr) => {
        #[test]
        fn $name() {
            assert($code, $expect, $text);
        }
    };
}

// ---- Identifiers ----
case!(ident_lower, "mov", Ident, "mov");
case!(ident_upper, "MOV", Ident, "MOV");
case!(ident_underscore, "_x_", Ident, "_x_");
case!(ident_stops_at_digit, "r2", Ident, "r");
case!(ident_leading_space, "   halt", Ident, "halt");
case!(ident_tab, "\tnop", Ident, "nop");

// ---- Literals ----
case!(literal_zero, "0", Literal, "0");
case!(literal_max, "255", Literal, "255");
case!(literal_wide, "65536", Literal, "65536");
case!(literal_leading_zero, "007", Literal, "007");
case!(literal_stops_at_letter, "12a", Literal, "12");

// ---- Separator ----
case!(separator, ",", Separator, ",");
case!(separator_pair, ",,", Separator, ",");

// ---- Invalid ----
case!(invalid_hash, "#1", Invalid, "#");
case!(invalid_dash, "-1", Invalid, "-");
case!(invalid_dot, ".", Invalid, ".");
case!(invalid_colon, ":", Invalid, ":");
case!(invalid_unicode, "π", Invalid, "π");
