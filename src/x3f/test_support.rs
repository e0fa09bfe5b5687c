//! Synthetic X3F containers for tests.

use crate::x3f::header::{MIN_FILE_SIZE, NUM_EXT_DATA_2_1, NUM_EXT_DATA_3_0};
use crate::x3f::tags::{self, Tag, Version};

fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn label<const N: usize>(text: &str) -> [u8; N] {
    let mut out = [0u8; N];
    let bytes = text.as_bytes();
    let len = bytes.len().min(N - 1);
    out[..len].copy_from_slice(&bytes[..len]);
    out
}

pub struct HeaderBuilder {
    version: Version,
    columns: u32,
    rows: u32,
    rotation: u32,
    white_balance: [u8; 32],
    color_mode: [u8; 32],
    extended: Vec<(usize, u8, f32)>,
}

impl HeaderBuilder {
    pub fn new(version: Version) -> Self {
        Self {
            version,
            columns: 1,
            rows: 1,
            rotation: 0,
            white_balance: [0; 32],
            color_mode: [0; 32],
            extended: Vec::new(),
        }
    }

    pub fn dimensions(mut self, columns: u32, rows: u32) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    pub fn rotation(mut self, degrees: u32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn white_balance(mut self, text: &str) -> Self {
        self.white_balance = label(text);
        self
    }

    pub fn color_mode(mut self, text: &str) -> Self {
        self.color_mode = label(text);
        self
    }

    pub fn extended_value(mut self, index: usize, kind: u8, value: f32) -> Self {
        self.extended.push((index, kind, value));
        self
    }

    /// Header bytes, zero padded up to the minimum accepted file size.
    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        put_u32(&mut out, tags::FOVB.0);
        put_u32(&mut out, self.version.0);
        if self.version < tags::VERSION_4_0 {
            out.extend_from_slice(&[0x5A; 16]);
            put_u32(&mut out, 0);
            put_u32(&mut out, self.columns);
            put_u32(&mut out, self.rows);
            put_u32(&mut out, self.rotation);
            if self.version >= tags::VERSION_2_1 {
                out.extend_from_slice(&self.white_balance);
                if self.version >= tags::VERSION_2_3 {
                    out.extend_from_slice(&self.color_mode);
                }
                let n = if self.version >= tags::VERSION_3_0 {
                    NUM_EXT_DATA_3_0
                } else {
                    NUM_EXT_DATA_2_1
                };
                let mut types = vec![0u8; n];
                let mut values = vec![0f32; n];
                for &(i, kind, value) in &self.extended {
                    types[i] = kind;
                    values[i] = value;
                }
                out.extend_from_slice(&types);
                for v in values {
                    out.extend_from_slice(&v.to_le_bytes());
                }
            }
        }
        if out.len() < MIN_FILE_SIZE {
            out.resize(MIN_FILE_SIZE, 0);
        }
        out
    }
}

/// Image section: SECi header followed by `payload`.
pub fn image_section(kind: u32, format: u32, width: u32, height: u32, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    put_u32(&mut out, tags::SECI.0);
    put_u32(&mut out, tags::VERSION_2_0.0);
    put_u32(&mut out, kind);
    put_u32(&mut out, format);
    put_u32(&mut out, width);
    put_u32(&mut out, height);
    put_u32(&mut out, payload.len() as u32);
    out.extend_from_slice(payload);
    out
}

/// Calibration section: SECc header, CAMF type, four header words, payload.
pub fn calibration_section(camf_type: u32, words: [u32; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    put_u32(&mut out, tags::SECC.0);
    put_u32(&mut out, tags::VERSION_2_0.0);
    put_u32(&mut out, camf_type);
    for w in words {
        put_u32(&mut out, w);
    }
    out.extend_from_slice(payload);
    out
}

pub struct PropertyListBuilder {
    signature: Tag,
    version: Version,
    format: u32,
    count: Option<u32>,
    entries: Vec<(u32, u32)>,
    chars: Vec<u16>,
}

impl PropertyListBuilder {
    pub fn new() -> Self {
        Self {
            signature: tags::SECP,
            version: tags::VERSION_2_0,
            format: 0,
            count: None,
            entries: Vec::new(),
            chars: Vec::new(),
        }
    }

    pub fn signature(mut self, tag: Tag) -> Self {
        self.signature = tag;
        self
    }

    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn format(mut self, format: u32) -> Self {
        self.format = format;
        self
    }

    /// Overrides the declared entry count without writing extra records.
    pub fn declared_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Appends a NUL terminated UTF-16 string to the character data and
    /// returns its offset in code units.
    pub fn push_units(&mut self, units: &[u16]) -> u32 {
        let offset = self.chars.len() as u32;
        self.chars.extend_from_slice(units);
        self.chars.push(0);
        offset
    }

    pub fn property(mut self, name: &str, value: &str) -> Self {
        let name: Vec<u16> = name.encode_utf16().collect();
        let value: Vec<u16> = value.encode_utf16().collect();
        let name_offset = self.push_units(&name);
        let value_offset = self.push_units(&value);
        self.entries.push((name_offset, value_offset));
        self
    }

    /// Entry record with arbitrary offsets, possibly pointing nowhere.
    pub fn raw_entry(mut self, name_offset: u32, value_offset: u32) -> Self {
        self.entries.push((name_offset, value_offset));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        put_u32(&mut out, self.signature.0);
        put_u32(&mut out, self.version.0);
        put_u32(&mut out, self.count.unwrap_or(self.entries.len() as u32));
        put_u32(&mut out, self.format);
        put_u32(&mut out, 0);
        put_u32(&mut out, self.chars.len() as u32);
        for &(name, value) in &self.entries {
            put_u32(&mut out, name);
            put_u32(&mut out, value);
        }
        for unit in &self.chars {
            out.extend_from_slice(&unit.to_le_bytes());
        }
        out
    }
}

struct PendingEntry {
    offset: Option<u32>,
    length: Option<u32>,
    tag: Tag,
    body: Vec<u8>,
}

/// Whole file: header, sections, directory, trailing directory pointer.
pub struct ContainerBuilder {
    header: HeaderBuilder,
    directory_signature: Tag,
    directory_version: Version,
    declared_entries: Option<u32>,
    entries: Vec<PendingEntry>,
    pointer_override: Option<u32>,
}

impl ContainerBuilder {
    pub fn new(version: Version) -> Self {
        Self::with_header(HeaderBuilder::new(version))
    }

    pub fn with_header(header: HeaderBuilder) -> Self {
        Self {
            header,
            directory_signature: tags::SECD,
            directory_version: tags::VERSION_2_0,
            declared_entries: None,
            entries: Vec::new(),
            pointer_override: None,
        }
    }

    pub fn directory_signature(mut self, tag: Tag) -> Self {
        self.directory_signature = tag;
        self
    }

    pub fn directory_version(mut self, version: Version) -> Self {
        self.directory_version = version;
        self
    }

    pub fn declared_entries(mut self, count: u32) -> Self {
        self.declared_entries = Some(count);
        self
    }

    pub fn directory_pointer(mut self, offset: u32) -> Self {
        self.pointer_override = Some(offset);
        self
    }

    /// Appends a section body and a directory entry pointing at it.
    pub fn section(mut self, tag: Tag, body: Vec<u8>) -> Self {
        self.entries.push(PendingEntry {
            offset: None,
            length: None,
            tag,
            body,
        });
        self
    }

    /// Directory entry with a fixed offset and length and no body.
    pub fn raw_entry(mut self, offset: u32, length: u32, tag: Tag) -> Self {
        self.entries.push(PendingEntry {
            offset: Some(offset),
            length: Some(length),
            tag,
            body: Vec::new(),
        });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = self.header.build();
        let mut records = Vec::new();
        for entry in &self.entries {
            while out.len() % 4 != 0 {
                out.push(0);
            }
            let offset = entry.offset.unwrap_or(out.len() as u32);
            let length = entry.length.unwrap_or(entry.body.len() as u32);
            out.extend_from_slice(&entry.body);
            records.push((offset, length, entry.tag));
        }
        while out.len() % 4 != 0 {
            out.push(0);
        }

        let directory_offset = out.len() as u32;
        put_u32(&mut out, self.directory_signature.0);
        put_u32(&mut out, self.directory_version.0);
        put_u32(
            &mut out,
            self.declared_entries.unwrap_or(records.len() as u32),
        );
        for (offset, length, tag) in records {
            put_u32(&mut out, offset);
            put_u32(&mut out, length);
            put_u32(&mut out, tag.0);
        }
        put_u32(&mut out, self.pointer_override.unwrap_or(directory_offset));
        out
    }
}
