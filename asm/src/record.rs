use arch8::Word;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum RecordType {
    Data = 0x00,
    Eof = 0x01,
    ExtendedLinearAddress = 0x04,
}

/// Which 64KB half of the image the following data records belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Bank {
    Zero = 0,
    One = 1,
}

impl Bank {
    /// Byte address where the bank starts.
    pub fn base(self) -> u32 {
        u32::from(u8::from(self)) << 16
    }
}

/// One line of the image: `:LLAAAATT<payload>CC`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexRecord {
    pub byte_count: u8,
    pub address: u16,
    pub record_type: RecordType,
    pub payload: Vec<u8>,
    pub checksum: u8,
}

/// Two's complement of the byte sum of every field but the checksum.
pub fn checksum(byte_count: u8, address: u16, record_type: RecordType, payload: &[u8]) -> u8 {
    let [hi, lo] = address.to_be_bytes();
    let sum = payload
        .iter()
        .fold(byte_count.wrapping_add(hi).wrapping_add(lo), |acc, b| {
            acc.wrapping_add(*b)
        })
        .wrapping_add(record_type.into());
    (!sum).wrapping_add(1)
}

impl HexRecord {
    /// Data records keep `address`; the other types always carry 0.
    /// Payloads longer than 255 bytes are truncated.
    pub fn new(record_type: RecordType, address: u16, payload: &[u8]) -> Self {
        let address = match record_type {
            RecordType::Data => address,
            RecordType::Eof | RecordType::ExtendedLinearAddress => 0,
        };
        let payload = match record_type {
            RecordType::Eof => Vec::new(),
            _ => payload[..payload.len().min(0xFF)].to_vec(),
        };
        let byte_count = payload.len() as u8;
        HexRecord {
            byte_count,
            address,
            record_type,
            checksum: checksum(byte_count, address, record_type, &payload),
            payload,
        }
    }

    pub fn data(address: u16, words: &[Word]) -> Self {
        let payload: Vec<u8> = words.iter().flat_map(|w| w.to_bytes()).collect();
        HexRecord::new(RecordType::Data, address, &payload)
    }

    pub fn eof() -> Self {
        HexRecord::new(RecordType::Eof, 0, &[])
    }

    pub fn bank(bank: Bank) -> Self {
        HexRecord::new(RecordType::ExtendedLinearAddress, 0, &[0x00, bank.into()])
    }

    /// The record as one text line, newline included.
    pub fn encode(&self) -> String {
        let mut line = format!(
            ":{:02X}{:04X}{:02X}",
            self.byte_count,
            self.address,
            u8::from(self.record_type)
        );
        for byte in &self.payload {
            let _ = write!(line, "{:02X}", byte);
        }
        let _ = writeln!(line, "{:02X}", self.checksum);
        line
    }

    /// Parse one line. Anything malformed, including a checksum mismatch,
    /// gives `None`.
    pub fn decode(line: &str) -> Option<Self> {
        let body = line.trim_end_matches(&['\n', '\r'][..]).strip_prefix(':')?;
        if body.len() < 10 || body.len() % 2 != 0 || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let bytes: Vec<u8> = (0..body.len())
            .step_by(2)
            .map(|idx| u8::from_str_radix(&body[idx..idx + 2], 16))
            .collect::<Result<_, _>>()
            .ok()?;

        let (head, rest) = bytes.split_at(4);
        let (payload, tail) = rest.split_at(rest.len() - 1);
        let byte_count = head[0];
        if usize::from(byte_count) != payload.len() {
            return None;
        }
        let address = u16::from_be_bytes([head[1], head[2]]);
        let record_type = RecordType::try_from(head[3]).ok()?;
        let record = HexRecord {
            byte_count,
            address,
            record_type,
            payload: payload.to_vec(),
            checksum: tail[0],
        };
        (checksum(byte_count, address, record_type, payload) == record.checksum).then_some(record)
    }

    /// Bank selected by an extended linear address record at address 0.
    pub fn selected_bank(&self) -> Option<Bank> {
        match (self.record_type, self.address, self.payload.as_slice()) {
            (RecordType::ExtendedLinearAddress, 0, [0x00, bank]) => Bank::try_from(*bank).ok(),
            _ => None,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.record_type == RecordType::Eof && self.address == 0 && self.payload.is_empty()
    }

    /// Instruction words of a data record. `None` for any other record or
    /// for a payload of odd length.
    pub fn words(&self) -> Option<Vec<Word>> {
        if self.record_type != RecordType::Data || self.payload.len() % Word::SIZE != 0 {
            return None;
        }
        Some(
            self.payload
                .chunks_exact(Word::SIZE)
                .map(|pair| Word::from_bytes([pair[0], pair[1]]))
                .collect(),
        )
    }

    /// Index of the first instruction in this record, given the active bank.
    pub fn first_index(&self, bank: Bank) -> u32 {
        (bank.base() + u32::from(self.address)) / Word::SIZE as u32
    }
}

pub fn encode_record(record_type: RecordType, address: u16, payload: &[u8]) -> String {
    HexRecord::new(record_type, address, payload).encode()
}

pub fn decode_record(line: &str) -> Option<HexRecord> {
    HexRecord::decode(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_lines() {
        assert_eq!(HexRecord::eof().encode(), ":00000001FF\n");
        assert_eq!(HexRecord::bank(Bank::Zero).encode(), ":020000040000FA\n");
        assert_eq!(HexRecord::bank(Bank::One).encode(), ":020000040001F9\n");
        assert_eq!(
            HexRecord::data(0x0010, &[Word::new(0x02, 0x0C), Word::HALT]).encode(),
            ":04001000020C0100DD\n"
        );
    }

    #[test]
    fn non_data_records_drop_address() {
        let line = encode_record(RecordType::Eof, 0x1234, &[1, 2]);
        assert_eq!(line, ":00000001FF\n");
        let line = encode_record(RecordType::ExtendedLinearAddress, 0xABCD, &[0, 1]);
        assert_eq!(line, ":020000040001F9\n");
    }

    #[test]
    fn decode_fields() {
        let record = decode_record(":04001000020C0100DD\n").unwrap();
        assert_eq!(record.byte_count, 4);
        assert_eq!(record.address, 0x0010);
        assert_eq!(record.record_type, RecordType::Data);
        assert_eq!(record.payload, vec![0x02, 0x0C, 0x01, 0x00]);
        assert_eq!(record.checksum, 0xDD);
        assert_eq!(record.words(), Some(vec![Word::new(0x02, 0x0C), Word::HALT]));
        assert_eq!(record.first_index(Bank::Zero), 8);
        assert_eq!(record.first_index(Bank::One), 0x8008);
    }

    #[test]
    fn decode_accepts_crlf_and_lowercase() {
        assert!(decode_record(":00000001ff\r\n").is_some());
        assert!(decode_record(":00000001FF").is_some());
    }

    #[test]
    fn decode_rejects_malformed() {
        for line in [
            "",
            ":",
            "00000001FF",
            ":00000001",
            ":00000001F",
            ":00000001FE",
            ":0000000+FF",
            ":01000001FF",
            ":00000002FE",
            ":020000040000FA00",
            ":00000001FF ",
            ":0000ä0001FF",
        ] {
            assert_eq!(decode_record(line), None, "{line:?}");
        }
    }

    #[test]
    fn bank_selection() {
        let zero = decode_record(":020000040000FA").unwrap();
        let one = decode_record(":020000040001F9").unwrap();
        let two = decode_record(":020000040002F8").unwrap();
        assert_eq!(zero.selected_bank(), Some(Bank::Zero));
        assert_eq!(one.selected_bank(), Some(Bank::One));
        assert_eq!(two.selected_bank(), None);
        assert_eq!(HexRecord::eof().selected_bank(), None);
        assert!(HexRecord::eof().is_eof());
        assert!(!zero.is_eof());
    }

    #[test]
    fn odd_payload_has_no_words() {
        let record = HexRecord::new(RecordType::Data, 0, &[0x02, 0x03, 0x04]);
        assert_eq!(record.words(), None);
        assert_eq!(HexRecord::eof().words(), None);
    }

    #[test]
    fn decode_inverts_encode() {
        let cases: [(RecordType, u16, &[u8]); 4] = [
            (RecordType::Data, 0x0000, &[]),
            (RecordType::Data, 0xFFF0, &[0xFF; 16]),
            (RecordType::Data, 0x1230, &[0x08, 0x00, 0x01, 0x00]),
            (RecordType::ExtendedLinearAddress, 0, &[0x00, 0x01]),
        ];
        for (record_type, address, payload) in cases {
            let line = encode_record(record_type, address, payload);
            let record = decode_record(&line).unwrap();
            assert_eq!(record.record_type, record_type);
            assert_eq!(record.address, address);
            assert_eq!(record.payload, payload);
            assert_eq!(record.encode(), line);
        }
    }

    #[test]
    fn any_single_digit_flip_is_detected() {
        let line = encode_record(RecordType::Data, 0x0120, &[0x02, 0x0C, 0x05, 0x00, 0x08, 0x00]);
        let line = line.trim_end();
        for idx in 1..line.len() {
            let current = line.as_bytes()[idx] as char;
            for digit in "0123456789ABCDEF".chars() {
                if digit.to_digit(16) == current.to_digit(16) {
                    continue;
                }
                let mut flipped = line.to_string();
                flipped.replace_range(idx..idx + 1, &digit.to_string());
                assert_eq!(decode_record(&flipped), None, "{flipped}");
            }
        }
    }
}
