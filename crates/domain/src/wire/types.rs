macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($prefix:literal) {
            $($variant:ident = $value:literal => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            Unknown(u16),
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Unknown(_) => "UNKNOWN",
                }
            }
        }

        impl From<u16> for $name {
            fn from(value: u16) -> Self {
                match value {
                    $($value => Self::$variant,)+
                    other => Self::Unknown(other),
                }
            }
        }

        impl From<$name> for u16 {
            fn from(value: $name) -> u16 {
                match value {
                    $($name::$variant => $value,)+
                    $name::Unknown(other) => other,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    Self::Unknown(code) => write!(f, "{}{}", $prefix, code),
                    other => f.write_str(other.as_str()),
                }
            }
        }
    };
}

pub(crate) use wire_enum;

wire_enum! {
    /// Resource record type code.
    pub enum RecordType ("TYPE") {
        A = 1 => "A",
        NS = 2 => "NS",
        CNAME = 5 => "CNAME",
        SOA = 6 => "SOA",
        PTR = 12 => "PTR",
        MX = 15 => "MX",
        TXT = 16 => "TXT",
        AAAA = 28 => "AAAA",
        SRV = 33 => "SRV",
        OPT = 41 => "OPT",
        SPF = 99 => "SPF",
        SVCB = 64 => "SVCB",
        HTTPS = 65 => "HTTPS",
        ANY = 255 => "ANY",
    }
}

wire_enum! {
    /// Resource record class code.
    pub enum RecordClass ("CLASS") {
        IN = 1 => "IN",
        CH = 3 => "CH",
        HS = 4 => "HS",
        NONE = 254 => "NONE",
        ANY = 255 => "ANY",
    }
}

wire_enum! {
    /// Header opcode (4 bits on the wire).
    pub enum Opcode ("OPCODE") {
        Query = 0 => "QUERY",
        InverseQuery = 1 => "IQUERY",
        Status = 2 => "STATUS",
        Notify = 4 => "NOTIFY",
        Update = 5 => "UPDATE",
    }
}

wire_enum! {
    /// Header response code (4 bits on the wire).
    pub enum ResponseCode ("RCODE") {
        NoError = 0 => "NOERROR",
        FormErr = 1 => "FORMERR",
        ServFail = 2 => "SERVFAIL",
        NxDomain = 3 => "NXDOMAIN",
        NotImp = 4 => "NOTIMP",
        Refused = 5 => "REFUSED",
        YxDomain = 6 => "YXDOMAIN",
        YxRrSet = 7 => "YXRRSET",
        NxRrSet = 8 => "NXRRSET",
        NotAuth = 9 => "NOTAUTH",
        NotZone = 10 => "NOTZONE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_type_round_trips_codes() {
        for code in [1u16, 5, 28, 64, 65, 99, 4242] {
            assert_eq!(u16::from(RecordType::from(code)), code);
        }
        assert_eq!(RecordType::from(28), RecordType::AAAA);
        assert_eq!(RecordType::from(4242), RecordType::Unknown(4242));
    }

    #[test]
    fn test_display() {
        assert_eq!(RecordType::HTTPS.to_string(), "HTTPS");
        assert_eq!(RecordType::Unknown(999).to_string(), "TYPE999");
        assert_eq!(ResponseCode::NxDomain.to_string(), "NXDOMAIN");
        assert_eq!(RecordClass::IN.to_string(), "IN");
    }
}
