//! Raw `gvar` edits.
//!
//! Appending glyphs without variations only grows the offset array: each new
//! entry repeats the final offset, so the new glyphs get empty data ranges.

use crate::{Error, Result};

const HEADER_LEN: usize = 20;
const SHARED_TUPLES_OFFSET: usize = 8;
const GLYPH_COUNT: usize = 12;
const FLAGS: usize = 14;
const DATA_ARRAY_OFFSET: usize = 16;
const LONG_OFFSETS: u16 = 1;

fn read_u16(data: &[u8], pos: usize) -> Result<u16> {
    data.get(pos..pos + 2)
        .map(|b| u16::from_be_bytes([b[0], b[1]]))
        .ok_or(Error::MalformedGvar)
}

fn read_u32(data: &[u8], pos: usize) -> Result<u32> {
    data.get(pos..pos + 4)
        .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or(Error::MalformedGvar)
}

/// Shift a table offset that points past the insertion point.
fn shift_offset(data: &mut [u8], pos: usize, offsets_end: usize, shift: usize) -> Result<()> {
    let offset = read_u32(data, pos)? as usize;
    if offset >= offsets_end {
        let shifted = u32::try_from(offset + shift).map_err(|_| Error::MalformedGvar)?;
        data[pos..pos + 4].copy_from_slice(&shifted.to_be_bytes());
    }
    Ok(())
}

/// Return a copy of `gvar` with `count` glyphs without variations appended.
pub fn append_empty_glyphs(gvar: &[u8], count: u16) -> Result<Vec<u8>> {
    if gvar.len() < HEADER_LEN {
        return Err(Error::MalformedGvar);
    }
    let glyph_count = read_u16(gvar, GLYPH_COUNT)?;
    let new_count = glyph_count.checked_add(count).ok_or(Error::MalformedGvar)?;
    let entry_len = if read_u16(gvar, FLAGS)? & LONG_OFFSETS != 0 { 4 } else { 2 };

    let offsets_end = HEADER_LEN + (glyph_count as usize + 1) * entry_len;
    let last = gvar.get(offsets_end - entry_len..offsets_end).ok_or(Error::MalformedGvar)?;
    let shift = count as usize * entry_len;

    let mut out = Vec::with_capacity(gvar.len() + shift);
    out.extend_from_slice(&gvar[..offsets_end]);
    for _ in 0..count {
        out.extend_from_slice(last);
    }
    out.extend_from_slice(&gvar[offsets_end..]);

    out[GLYPH_COUNT..GLYPH_COUNT + 2].copy_from_slice(&new_count.to_be_bytes());
    shift_offset(&mut out, SHARED_TUPLES_OFFSET, offsets_end, shift)?;
    shift_offset(&mut out, DATA_ARRAY_OFFSET, offsets_end, shift)?;
    Ok(out)
}
