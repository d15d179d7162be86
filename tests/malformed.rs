use patternio::prelude::*;
use pretty_assertions::assert_eq;

fn file(declared_len: u32, body: &[u8]) -> Vec<u8> {
    let mut bytes = FileHeader::new(FormatType::SingleMultiChannel, 1, 480)
        .to_bytes()
        .to_vec();
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&declared_len.to_be_bytes());
    bytes.extend_from_slice(body);
    bytes
}

#[test]
fn track_shorter_than_declared() {
    let err = Pattern::parse(&file(5, &[0x00, 0xFF, 0x2F])).unwrap_err();
    assert_eq!(err.error_kind(), &ReaderErrorKind::TruncatedStream);
    assert!(err.is_truncated());
}

#[test]
fn event_cut_by_chunk_boundary() {
    // note on whose velocity falls outside the chunk
    let err = Pattern::parse(&file(3, &[0x00, 0x90, 60, 100])).unwrap_err();
    assert!(err.is_truncated());
    assert_eq!(err.position(), 24);
}

#[test]
fn missing_track_chunk() {
    let bytes = FileHeader::new(FormatType::Simultaneous, 2, 480).to_bytes();
    let err = Pattern::parse(&bytes).unwrap_err();
    assert!(err.is_truncated());
    assert_eq!(err.position(), 14);
}

#[test]
fn wrong_chunk_magic() {
    let mut bytes = file(0, &[]);
    bytes[14..18].copy_from_slice(b"XTrk");
    assert_eq!(
        Pattern::parse(&bytes).unwrap_err().error_kind(),
        &ReaderErrorKind::BadMagic {
            expected: *b"MTrk",
            found: *b"XTrk"
        }
    );
}

#[test]
fn varlen_with_five_groups() {
    let err = Pattern::parse(&file(6, &[0x81, 0x81, 0x81, 0x81, 0x01, 0x00])).unwrap_err();
    assert_eq!(err.error_kind(), &ReaderErrorKind::VarLenTooLong);
}

#[test]
fn data_byte_at_track_start() {
    let err = Pattern::parse(&file(3, &[0x00, 0x40, 0x40])).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::MissingRunningStatus(0x40)
    );
}

#[test]
fn unregistered_system_status() {
    let err = Pattern::parse(&file(2, &[0x00, 0xF2])).unwrap_err();
    assert_eq!(err.error_kind(), &ReaderErrorKind::UnknownStatus(0xF2));
}

#[test]
fn trailing_bytes_are_ignored() {
    let mut bytes = file(4, &[0x00, 0xFF, 0x2F, 0x00]);
    bytes.extend_from_slice(b"junk after the last track");
    let pattern = Pattern::parse(&bytes).unwrap();
    assert_eq!(pattern.len(), 1);
    assert!(pattern.tracks()[0].events()[0].message().is_end_of_track());
}

#[test]
fn unknown_meta_round_trips_byte_for_byte() {
    let body = [0x00, 0xFF, 0x7C, 0x03, 0x10, 0x20, 0x30, 0x00, 0xFF, 0x2F, 0x00];
    let bytes = file(body.len() as u32, &body);

    let pattern = Pattern::parse(&bytes).unwrap();
    let unknown = pattern.tracks()[0].events()[0]
        .message()
        .as_unknown_meta()
        .unwrap();
    assert_eq!(unknown.command(), 0x7C);
    assert_eq!(unknown.data(), &[0x10, 0x20, 0x30]);
    assert_eq!(pattern.to_bytes().unwrap(), bytes);
}

#[test]
fn writer_rejects_unencodable_patterns() {
    let too_far = Track::with_events([RawEvent::new(0x1000_0000, MetaEvent::end_of_track())]);
    let pattern = Pattern::with_tracks(FormatType::SingleMultiChannel, 480, [too_far]);
    assert_eq!(
        pattern.to_bytes().unwrap_err(),
        WriterError::ValueOutOfRange(0x1000_0000)
    );

    let tracks = (0..=u16::MAX as usize).map(|_| Track::new());
    let pattern = Pattern::with_tracks(FormatType::Simultaneous, 480, tracks);
    assert_eq!(
        pattern.to_bytes().unwrap_err(),
        WriterError::TooManyTracks(65_536)
    );
}
