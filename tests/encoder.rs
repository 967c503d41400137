mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use embedded_hal::delay::DelayNs;
    use ws2801_strip::{BitEncoder, Duration, PinPair, Timings};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Clock(bool),
        Data(bool),
        DelayNs(u32),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct RecordingPins(Log);

    impl PinPair for RecordingPins {
        fn set_clock(&mut self, high: bool) {
            self.0.borrow_mut().push(Event::Clock(high));
        }

        fn set_data(&mut self, high: bool) {
            self.0.borrow_mut().push(Event::Data(high));
        }
    }

    struct RecordingDelay(Log);

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.0.borrow_mut().push(Event::DelayNs(ns));
        }
    }

    fn encoder(timings: Timings) -> (BitEncoder<RecordingPins, RecordingDelay>, Log) {
        let log = Log::default();
        let encoder = BitEncoder::new(
            RecordingPins(log.clone()),
            RecordingDelay(log.clone()),
            timings,
        );
        (encoder, log)
    }

    /// Data level seen at every rising clock edge
    fn sampled_bits(events: &[Event]) -> Vec<bool> {
        let mut data = false;
        let mut clock = false;
        let mut bits = Vec::new();
        for event in events {
            match *event {
                Event::Data(level) => data = level,
                Event::Clock(level) => {
                    if level && !clock {
                        bits.push(data);
                    }
                    clock = level;
                }
                Event::DelayNs(_) => {}
            }
        }
        bits
    }

    #[test]
    fn test_bits_are_sent_msb_first() {
        let (mut encoder, log) = encoder(Timings::DEFAULT);
        encoder.transmit([0b1010_0001]);

        let bits = sampled_bits(&log.borrow());
        assert_eq!(
            bits,
            vec![true, false, true, false, false, false, false, true]
        );
    }

    #[test]
    fn test_each_bit_is_clock_low_data_clock_high_hold() {
        let (mut encoder, log) = encoder(Timings::DEFAULT);
        encoder.transmit([0x80]);

        let events = log.borrow();
        assert_eq!(
            &events[..4],
            &[
                Event::Clock(false),
                Event::Data(true),
                Event::Clock(true),
                Event::DelayNs(1_000),
            ]
        );
        assert_eq!(
            &events[4..8],
            &[
                Event::Clock(false),
                Event::Data(false),
                Event::Clock(true),
                Event::DelayNs(1_000),
            ]
        );
    }

    #[test]
    fn test_transfer_ends_with_latch() {
        let (mut encoder, log) = encoder(Timings::DEFAULT);
        encoder.transmit([1, 2, 3]);

        let events = log.borrow();
        let n = events.len();
        assert_eq!(
            &events[n - 2..],
            &[Event::Clock(false), Event::DelayNs(1_000_000)]
        );
        // 24 bits of four events each, plus the latch
        assert_eq!(n, 24 * 4 + 2);
    }

    #[test]
    fn test_one_rising_edge_per_bit() {
        let (mut encoder, log) = encoder(Timings::DEFAULT);
        let frame = [0xFF, 0x00, 0x5A, 0xA5, 0x0F, 0xF0];
        encoder.transmit(frame);

        let bits = sampled_bits(&log.borrow());
        assert_eq!(bits.len(), frame.len() * 8);

        let bytes: Vec<u8> = bits
            .chunks(8)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit)))
            .collect();
        assert_eq!(bytes, frame);
    }

    #[test]
    fn test_empty_transfer_only_latches() {
        let (mut encoder, log) = encoder(Timings::DEFAULT);
        encoder.transmit([0u8; 0]);

        assert_eq!(
            *log.borrow(),
            vec![Event::Clock(false), Event::DelayNs(1_000_000)]
        );
    }

    #[test]
    fn test_custom_timings_are_used() {
        let timings = Timings::new(Duration::from_micros(5), Duration::from_millis(2));
        let (mut encoder, log) = encoder(timings);
        encoder.transmit([0x01]);

        let events = log.borrow();
        assert!(events.contains(&Event::DelayNs(5_000)));
        assert!(!events.contains(&Event::DelayNs(1_000)));
        assert_eq!(events.last(), Some(&Event::DelayNs(2_000_000)));
        assert_eq!(encoder.timings(), timings);
    }

    #[test]
    fn test_timings_never_drop_below_protocol_minimum() {
        let timings = Timings::new(Duration::from_micros(0), Duration::from_micros(10));
        assert_eq!(timings, Timings::DEFAULT);
        assert_eq!(timings.bit_hold(), Duration::from_micros(1));
        assert_eq!(timings.latch(), Duration::from_millis(1));
        assert_eq!(Timings::default(), Timings::DEFAULT);
    }

    #[test]
    fn test_release_returns_pins_and_delay() {
        let (mut encoder, log) = encoder(Timings::DEFAULT);
        encoder.transmit([0xAA]);
        let (mut pins, _delay) = encoder.release();

        pins.set_clock(true);
        assert_eq!(log.borrow().last(), Some(&Event::Clock(true)));
    }
}
