//! Captured DNS responses, written as hex. Names in answer and authority
//! sections use compression pointers back into the question.

pub fn hex(s: &str) -> Vec<u8> {
    let digits: Vec<u8> = s
        .bytes()
        .filter(|b| b.is_ascii_hexdigit())
        .map(|b| (b as char).to_digit(16).unwrap() as u8)
        .collect();
    assert!(digits.len() % 2 == 0, "odd number of hex digits");
    digits.chunks(2).map(|p| (p[0] << 4) | p[1]).collect()
}

/// example.com question, starting at offset 12.
const QNAME: &str = "07 6578616d706c65 03 636f6d 00";

fn with_question(header: &str, qtype: &str, rest: &str) -> Vec<u8> {
    hex(&format!("{header} {QNAME} {qtype} 0001 {rest}"))
}

/// example.com A 3600 93.184.216.34
pub fn a_response() -> Vec<u8> {
    with_question(
        "1234 8180 0001 0001 0000 0000",
        "0001",
        "c00c 0001 0001 00000e10 0004 5db8d822",
    )
}

/// example.com AAAA 3600 2606:2800:220:1:248:1893:25c8:1946
pub fn aaaa_response() -> Vec<u8> {
    with_question(
        "0007 8180 0001 0001 0000 0000",
        "001c",
        "c00c 001c 0001 00000e10 0010 26062800022000010248189325c81946",
    )
}

/// www.example.com CNAME example.com, example.com A 93.184.216.34
pub fn cname_chain_response() -> Vec<u8> {
    hex("abcd 8180 0001 0002 0000 0000 \
         03 777777 07 6578616d706c65 03 636f6d 00 0001 0001 \
         c00c 0005 0001 0000012c 0002 c010 \
         c010 0001 0001 0000003c 0004 5db8d822")
}

/// example.com MX 10 mail.example.com
pub fn mx_response() -> Vec<u8> {
    with_question(
        "0002 8180 0001 0001 0000 0000",
        "000f",
        "c00c 000f 0001 00000e10 0009 000a 04 6d61696c c00c",
    )
}

/// example.com TXT "v=spf1 -all"
pub fn txt_response() -> Vec<u8> {
    with_question(
        "0003 8180 0001 0001 0000 0000",
        "0010",
        "c00c 0010 0001 0000012c 000c 0b 763d73706631202d616c6c",
    )
}

/// NXDOMAIN for nope.example.com with the zone SOA in the authority section.
pub fn nxdomain_with_soa() -> Vec<u8> {
    hex("0004 8183 0001 0000 0001 0000 \
         04 6e6f7065 07 6578616d706c65 03 636f6d 00 0001 0001 \
         c011 0006 0001 00000384 0026 \
         02 6e73 c011 \
         0a 686f73746d6173746572 c011 \
         00000001 00001c20 00000e10 00127500 0000012c")
}

/// example.com HTTPS 1 . alpn=h3 ipv4hint=93.184.216.34 ipv6hint=2606:2800:220:1:248:1893:25c8:1946
pub fn https_response() -> Vec<u8> {
    with_question(
        "0005 8180 0001 0001 0000 0000",
        "0041",
        "c00c 0041 0001 0000012c 0026 \
         0001 00 \
         0001 0003 02 6833 \
         0004 0004 5db8d822 \
         0006 0010 26062800022000010248189325c81946",
    )
}

/// example.com TYPE4660 with three opaque bytes.
pub fn unknown_type_response() -> Vec<u8> {
    with_question(
        "0006 8180 0001 0001 0000 0000",
        "1234",
        "c00c 1234 0001 0000003c 0003 aabbcc",
    )
}

/// `\255a.com` A 3600 93.184.216.34; the first label is not UTF-8.
pub fn binary_label_response() -> Vec<u8> {
    hex("1234 8180 0001 0001 0000 0000 \
         02ff61 03636f6d 00 0001 0001 \
         c00c 0001 0001 00000e10 0004 5db8d822")
}
