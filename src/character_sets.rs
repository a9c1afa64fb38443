/// Check if a byte is an ASCII tab or newline
pub fn is_ascii_tab_or_newline(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | b'\r')
}

/// C0 control or space: the bytes WHATWG trims from both ends of a URL
pub fn is_c0_control_or_space(b: u8) -> bool {
    b <= 0x20
}

/// Path separators, including the backslash special schemes treat as `/`
pub fn is_path_separator(b: u8) -> bool {
    matches!(b, b'/' | b'\\')
}

/// Byte classes packed into one table
const SCHEME_START: u8 = 1;
const SCHEME: u8 = 2;
const UNRESERVED: u8 = 4;

const CHAR_CLASS_TABLE: [u8; 256] = {
    let mut table = [0u8; 256];

    // Letters start a scheme and are unreserved
    let mut i = b'a';
    while i <= b'z' {
        table[i as usize] = SCHEME_START | SCHEME | UNRESERVED;
        table[(i - 32) as usize] = SCHEME_START | SCHEME | UNRESERVED;
        i += 1;
    }
    let mut i = b'0';
    while i <= b'9' {
        table[i as usize] = SCHEME | UNRESERVED;
        i += 1;
    }

    table[b'+' as usize] = SCHEME;
    table[b'-' as usize] = SCHEME | UNRESERVED;
    table[b'.' as usize] = SCHEME | UNRESERVED;
    table[b'_' as usize] = UNRESERVED;
    table[b'~' as usize] = UNRESERVED;

    // Tabs and newlines are stripped from schemes before use, so tolerate them
    table[b'\t' as usize] = SCHEME;
    table[b'\n' as usize] = SCHEME;
    table[b'\r' as usize] = SCHEME;

    table
};

/// First byte of a scheme: ASCII letter
pub fn is_scheme_start_byte(b: u8) -> bool {
    CHAR_CLASS_TABLE[b as usize] & SCHEME_START != 0
}

/// Remaining scheme bytes: alphanumerics, `+`, `-`, `.`, tabs and newlines
pub fn is_scheme_byte(b: u8) -> bool {
    CHAR_CLASS_TABLE[b as usize] & SCHEME != 0
}

/// RFC 3986 unreserved characters: `A-Z a-z 0-9 - . _ ~`
pub fn is_unreserved(b: u8) -> bool {
    CHAR_CLASS_TABLE[b as usize] & UNRESERVED != 0
}
