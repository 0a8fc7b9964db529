//! ASN.1 identifier octets.

use alloc::vec::Vec;
use core::fmt;

use crate::errors::{Error, Result};

const CONSTRUCTED_FLAG: u8 = 0b0010_0000;
const HIGH_TAG_NUMBER: u8 = 0b0001_1111;

/// Tag class (bits 8 and 7 of the identifier octet).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Class {
    /// `UNIVERSAL`
    Universal,
    /// `APPLICATION`
    Application,
    /// `CONTEXT-SPECIFIC`, written `[n]`.
    ContextSpecific,
    /// `PRIVATE`
    Private,
}

impl Class {
    fn from_bits(octet: u8) -> Self {
        match octet >> 6 {
            0b00 => Class::Universal,
            0b01 => Class::Application,
            0b10 => Class::ContextSpecific,
            _ => Class::Private,
        }
    }

    fn bits(self) -> u8 {
        match self {
            Class::Universal => 0b0000_0000,
            Class::Application => 0b0100_0000,
            Class::ContextSpecific => 0b1000_0000,
            Class::Private => 0b1100_0000,
        }
    }
}

/// ASN.1 tag: class, tag number and the primitive/constructed flag.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Tag {
    class: Class,
    number: u32,
    constructed: bool,
}

impl Tag {
    /// `BOOLEAN`
    pub const BOOLEAN: Tag = Tag::universal(1, false);
    /// `INTEGER`
    pub const INTEGER: Tag = Tag::universal(2, false);
    /// `BIT STRING`
    pub const BIT_STRING: Tag = Tag::universal(3, false);
    /// `OCTET STRING`
    pub const OCTET_STRING: Tag = Tag::universal(4, false);
    /// `NULL`
    pub const NULL: Tag = Tag::universal(5, false);
    /// `OBJECT IDENTIFIER`
    pub const OBJECT_IDENTIFIER: Tag = Tag::universal(6, false);
    /// `UTF8String`
    pub const UTF8_STRING: Tag = Tag::universal(12, false);
    /// `SEQUENCE` / `SEQUENCE OF`
    pub const SEQUENCE: Tag = Tag::universal(16, true);
    /// `SET` / `SET OF`
    pub const SET: Tag = Tag::universal(17, true);
    /// `PrintableString`
    pub const PRINTABLE_STRING: Tag = Tag::universal(19, false);
    /// `IA5String`
    pub const IA5_STRING: Tag = Tag::universal(22, false);

    /// Create a new tag.
    pub const fn new(class: Class, number: u32, constructed: bool) -> Self {
        Self {
            class,
            number,
            constructed,
        }
    }

    /// Create a `UNIVERSAL` tag.
    pub const fn universal(number: u32, constructed: bool) -> Self {
        Self::new(Class::Universal, number, constructed)
    }

    /// Create a context-specific tag `[number]`.
    pub const fn context_specific(number: u32, constructed: bool) -> Self {
        Self::new(Class::ContextSpecific, number, constructed)
    }

    /// Tag class.
    pub const fn class(&self) -> Class {
        self.class
    }

    /// Tag number.
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Is the constructed bit set?
    pub const fn is_constructed(&self) -> bool {
        self.constructed
    }

    /// Same class and number, with the constructed bit set as given.
    pub(crate) const fn with_constructed(self, constructed: bool) -> Self {
        Self::new(self.class, self.number, constructed)
    }

    /// Number of identifier octets this tag occupies.
    pub(crate) fn encoded_len(&self) -> usize {
        if self.number < u32::from(HIGH_TAG_NUMBER) {
            1
        } else {
            1 + base128_len(self.number)
        }
    }

    pub(crate) fn encode_into(&self, out: &mut Vec<u8>) {
        let mut first = self.class.bits();
        if self.constructed {
            first |= CONSTRUCTED_FLAG;
        }

        if self.number < u32::from(HIGH_TAG_NUMBER) {
            // Fits in the low five bits; the cast cannot truncate.
            out.push(first | self.number as u8);
            return;
        }

        out.push(first | HIGH_TAG_NUMBER);
        let groups = base128_len(self.number);
        for i in (0..groups).rev() {
            let mut octet = ((self.number >> (7 * i)) & 0x7f) as u8;
            if i != 0 {
                octet |= 0x80;
            }
            out.push(octet);
        }
    }

    /// Parse identifier octets from the front of `input`, returning the tag
    /// and the number of octets consumed.
    pub(crate) fn decode(input: &[u8]) -> Result<(Self, usize)> {
        let first = *input.first().ok_or(Error::UnexpectedEnd)?;
        let class = Class::from_bits(first);
        let constructed = first & CONSTRUCTED_FLAG != 0;

        if first & HIGH_TAG_NUMBER != HIGH_TAG_NUMBER {
            let number = u32::from(first & HIGH_TAG_NUMBER);
            return Ok((Self::new(class, number, constructed), 1));
        }

        let mut number: u32 = 0;
        let mut pos = 1;
        loop {
            let octet = *input.get(pos).ok_or(Error::UnexpectedEnd)?;
            if pos == 1 && octet == 0x80 {
                return Err(Error::InvalidTag);
            }
            if number > (u32::MAX >> 7) {
                return Err(Error::InvalidTag);
            }
            number = (number << 7) | u32::from(octet & 0x7f);
            pos += 1;
            if octet & 0x80 == 0 {
                break;
            }
        }

        // Numbers below 31 must use the single-octet form.
        if number < u32::from(HIGH_TAG_NUMBER) {
            return Err(Error::InvalidTag);
        }

        Ok((Self::new(class, number, constructed), pos))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.constructed {
            "constructed"
        } else {
            "primitive"
        };
        match self.class {
            Class::Universal => write!(f, "UNIVERSAL {} ({kind})", self.number),
            Class::Application => write!(f, "[APPLICATION {}] ({kind})", self.number),
            Class::ContextSpecific => write!(f, "[{}] ({kind})", self.number),
            Class::Private => write!(f, "[PRIVATE {}] ({kind})", self.number),
        }
    }
}

/// Number of base-128 groups needed for `value`.
pub(crate) fn base128_len(value: u32) -> usize {
    let bits = 32 - value.leading_zeros() as usize;
    core::cmp::max(1, bits.div_ceil(7))
}
