//! Minimal valid MP3 audio for mock responses

/// MPEG-1 layer III, 128 kbps, 44.1 kHz, stereo, no CRC
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];

/// Length of one frame with the header above
pub const FRAME_LEN: usize = 417;

/// One MP3 frame whose payload is filled with `fill`
pub fn mp3_frame(fill: u8) -> Vec<u8> {
    let mut frame = FRAME_HEADER.to_vec();
    frame.resize(FRAME_LEN, fill);
    frame
}

/// Frame the mocks return for `text`
///
/// The payload byte is derived from the text so merged output can be checked
/// against the lines that produced it.
pub fn frame_for(text: &str) -> Vec<u8> {
    #[allow(clippy::cast_possible_truncation)]
    let fill = text.len() as u8;
    mp3_frame(fill)
}
