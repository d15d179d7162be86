use patternio::prelude::*;
use pretty_assertions::assert_eq;

fn body_of(bytes: &[u8]) -> &[u8] {
    &bytes[22..]
}

#[test]
fn scenario_note_on_and_off() {
    let pattern = Pattern::with_tracks(
        FormatType::SingleMultiChannel,
        480,
        [Track::with_events([
            RawEvent::new(0, ChannelEvent::note_on(Channel::One, 60, 100)),
            RawEvent::new(480, ChannelEvent::note_off(Channel::One, 60, 0)),
        ])],
    );
    let bytes = pattern.to_bytes().unwrap();
    assert_eq!(
        body_of(&bytes),
        &[0x00, 0x90, 60, 100, 0x83, 0x60, 0x80, 60, 0]
    );
}

#[test]
fn repeated_status_is_omitted() {
    let track: Track = [60, 62, 64, 65]
        .into_iter()
        .map(|pitch| RawEvent::new(10, ChannelEvent::note_on(Channel::Five, pitch, 90)))
        .collect();
    let pattern = Pattern::with_tracks(FormatType::SingleMultiChannel, 480, [track.clone()]);
    let bytes = pattern.to_bytes().unwrap();

    assert_eq!(
        body_of(&bytes),
        &[10, 0x94, 60, 90, 10, 62, 90, 10, 64, 90, 10, 65, 90]
    );
    assert_eq!(Pattern::parse(&bytes).unwrap().tracks()[0], track);
}

#[test]
fn meta_and_sysex_do_not_break_running_status() {
    let track = Track::with_events([
        RawEvent::new(0, ChannelEvent::control_change(Channel::One, 1, 10)),
        RawEvent::new(0, MetaEvent::text(MetaKind::Marker, "x")),
        RawEvent::new(0, SysexEvent::new([0x01])),
        RawEvent::new(0, ChannelEvent::control_change(Channel::One, 1, 20)),
    ]);
    let pattern = Pattern::with_tracks(FormatType::SingleMultiChannel, 480, [track.clone()]);
    let bytes = pattern.to_bytes().unwrap();

    assert_eq!(
        body_of(&bytes),
        &[
            0x00, 0xB0, 1, 10, //
            0x00, 0xFF, 0x06, 0x01, b'x', //
            0x00, 0xF0, 0x01, 0xF7, //
            0x00, 1, 20,
        ]
    );
    assert_eq!(Pattern::parse(&bytes).unwrap().tracks()[0], track);
}

#[test]
fn running_status_from_another_encoder() {
    // a file that uses running status across a channel change back and forth
    let mut bytes = FileHeader::new(FormatType::SingleMultiChannel, 1, 96)
        .to_bytes()
        .to_vec();
    let body = [
        0x00, 0x92, 40, 1, //
        0x00, 41, 2, //
        0x00, 0x93, 42, 3, //
        0x00, 43, 4,
    ];
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&(body.len() as u32).to_be_bytes());
    bytes.extend_from_slice(&body);

    let pattern = Pattern::parse(&bytes).unwrap();
    let decoded: Vec<(Channel, u8)> = pattern.tracks()[0]
        .iter()
        .map(|e| {
            let c = e.message().as_channel().unwrap();
            (c.channel(), c.pitch().unwrap())
        })
        .collect();
    assert_eq!(
        decoded,
        [
            (Channel::Three, 40),
            (Channel::Three, 41),
            (Channel::Four, 42),
            (Channel::Four, 43)
        ]
    );
}
