use ferrous_resolver_domain::wire::{Header, Opcode, ResponseCode};

#[test]
fn test_flag_bit_positions() {
    let mut header = Header::default();

    header.set_response(true);
    assert_eq!(header.flags, 0x8000);
    header.set_response(false);

    header.set_opcode(Opcode::Status);
    assert_eq!(header.flags, 0x1000);
    header.set_opcode(Opcode::Query);

    header.set_authoritative(true);
    assert_eq!(header.flags, 0x0400);
    header.set_authoritative(false);

    header.set_truncated(true);
    assert_eq!(header.flags, 0x0200);
    header.set_truncated(false);

    header.set_recursion_desired(true);
    assert_eq!(header.flags, 0x0100);
    header.set_recursion_desired(false);

    header.set_recursion_available(true);
    assert_eq!(header.flags, 0x0080);
    header.set_recursion_available(false);

    header.set_response_code(ResponseCode::Refused);
    assert_eq!(header.flags, 0x0005);
}

#[test]
fn test_setters_leave_other_bits_untouched() {
    let mut header = Header {
        flags: 0xFFFF,
        ..Header::default()
    };

    header.set_opcode(Opcode::Query);
    assert_eq!(header.flags, 0x87FF, "only bits 14-11 should clear");

    header.set_response_code(ResponseCode::NoError);
    assert_eq!(header.flags, 0x87F0, "only bits 3-0 should clear");

    header.set_truncated(false);
    assert_eq!(header.flags, 0x85F0);

    header.set_opcode(Opcode::Update);
    assert_eq!(header.opcode(), Opcode::Update);
    assert!(header.is_response());
    assert!(header.is_authoritative());
    assert!(!header.is_truncated());
    assert!(header.recursion_desired());
    assert!(header.recursion_available());
}

#[test]
fn test_getters_decode_typical_response() {
    let header = Header {
        flags: 0x8183,
        ..Header::default()
    };
    assert!(header.is_response());
    assert_eq!(header.opcode(), Opcode::Query);
    assert!(!header.is_authoritative());
    assert!(header.recursion_desired());
    assert!(header.recursion_available());
    assert_eq!(header.response_code(), ResponseCode::NxDomain);
}

#[test]
fn test_unregistered_codes_are_preserved() {
    let mut header = Header::default();
    header.set_response_code(ResponseCode::Unknown(15));
    assert_eq!(header.response_code(), ResponseCode::Unknown(15));
    header.set_opcode(Opcode::Unknown(9));
    assert_eq!(header.opcode(), Opcode::Unknown(9));
    assert_eq!(header.flags, (9 << 11) | 15);
}
