//! Fixed Code 128 symbol pattern table.
//!
//! Each entry lists the element widths of one symbol, alternating
//! bar/space and always starting with a bar. Values 0–102 are the data
//! symbols (in subset C, the two-digit value 00–99 plus the three shift
//! codes), 103–105 are the start codes (105 = Start C), and 106 is the
//! STOP symbol. Every symbol except STOP spans 11 modules; STOP spans 13.

pub(super) const START_C: usize = 105;
pub(super) const STOP: usize = 106;

pub(super) const SYMBOL_WIDTHS: [&[u8]; 107] = [
    &[2, 1, 2, 2, 2, 2], // 0
    &[2, 2, 2, 1, 2, 2], // 1
    &[2, 2, 2, 2, 2, 1], // 2
    &[1, 2, 1, 2, 2, 3], // 3
    &[1, 2, 1, 3, 2, 2], // 4
    &[1, 3, 1, 2, 2, 2], // 5
    &[1, 2, 2, 2, 1, 3], // 6
    &[1, 2, 2, 3, 1, 2], // 7
    &[1, 3, 2, 2, 1, 2], // 8
    &[2, 2, 1, 2, 1, 3], // 9
    &[2, 2, 1, 3, 1, 2], // 10
    &[2, 3, 1, 2, 1, 2], // 11
    &[1, 1, 2, 2, 3, 2], // 12
    &[1, 2, 2, 1, 3, 2], // 13
    &[1, 2, 2, 2, 3, 1], // 14
    &[1, 1, 3, 2, 2, 2], // 15
    &[1, 2, 3, 1, 2, 2], // 16
    &[1, 2, 3, 2, 2, 1], // 17
    &[2, 2, 3, 2, 1, 1], // 18
    &[2, 2, 1, 1, 3, 2], // 19
    &[2, 2, 1, 2, 3, 1], // 20
    &[2, 1, 3, 2, 1, 2], // 21
    &[2, 2, 3, 1, 1, 2], // 22
    &[3, 1, 2, 1, 3, 1], // 23
    &[3, 1, 1, 2, 2, 2], // 24
    &[3, 2, 1, 1, 2, 2], // 25
    &[3, 2, 1, 2, 2, 1], // 26
    &[3, 1, 2, 2, 1, 2], // 27
    &[3, 2, 2, 1, 1, 2], // 28
    &[3, 2, 2, 2, 1, 1], // 29
    &[2, 1, 2, 1, 2, 3], // 30
    &[2, 1, 2, 3, 2, 1], // 31
    &[2, 3, 2, 1, 2, 1], // 32
    &[1, 1, 1, 3, 2, 3], // 33
    &[1, 3, 1, 1, 2, 3], // 34
    &[1, 3, 1, 3, 2, 1], // 35
    &[1, 1, 2, 3, 1, 3], // 36
    &[1, 3, 2, 1, 1, 3], // 37
    &[1, 3, 2, 3, 1, 1], // 38
    &[2, 1, 1, 3, 1, 3], // 39
    &[2, 3, 1, 1, 1, 3], // 40
    &[2, 3, 1, 3, 1, 1], // 41
    &[1, 1, 2, 1, 3, 3], // 42
    &[1, 1, 2, 3, 3, 1], // 43
    &[1, 3, 2, 1, 3, 1], // 44
    &[1, 1, 3, 1, 2, 3], // 45
    &[1, 1, 3, 3, 2, 1], // 46
    &[1, 3, 3, 1, 2, 1], // 47
    &[3, 1, 3, 1, 2, 1], // 48
    &[2, 1, 1, 3, 3, 1], // 49
    &[2, 3, 1, 1, 3, 1], // 50
    &[2, 1, 3, 1, 1, 3], // 51
    &[2, 1, 3, 3, 1, 1], // 52
    &[2, 1, 3, 1, 3, 1], // 53
    &[3, 1, 1, 1, 2, 3], // 54
    &[3, 1, 1, 3, 2, 1], // 55
    &[3, 3, 1, 1, 2, 1], // 56
    &[3, 1, 2, 1, 1, 3], // 57
    &[3, 1, 2, 3, 1, 1], // 58
    &[3, 3, 2, 1, 1, 1], // 59
    &[3, 1, 4, 1, 1, 1], // 60
    &[2, 2, 1, 4, 1, 1], // 61
    &[4, 3, 1, 1, 1, 1], // 62
    &[1, 1, 1, 2, 2, 4], // 63
    &[1, 1, 1, 4, 2, 2], // 64
    &[1, 2, 1, 1, 2, 4], // 65
    &[1, 2, 1, 4, 2, 1], // 66
    &[1, 4, 1, 1, 2, 2], // 67
    &[1, 4, 1, 2, 2, 1], // 68
    &[1, 1, 2, 2, 1, 4], // 69
    &[1, 1, 2, 4, 1, 2], // 70
    &[1, 2, 2, 1, 1, 4], // 71
    &[1, 2, 2, 4, 1, 1], // 72
    &[1, 4, 2, 1, 1, 2], // 73
    &[1, 4, 2, 2, 1, 1], // 74
    &[2, 4, 1, 2, 1, 1], // 75
    &[2, 2, 1, 1, 1, 4], // 76
    &[4, 1, 3, 1, 1, 1], // 77
    &[2, 4, 1, 1, 1, 2], // 78
    &[1, 3, 4, 1, 1, 1], // 79
    &[1, 1, 1, 2, 4, 2], // 80
    &[1, 2, 1, 1, 4, 2], // 81
    &[1, 2, 1, 2, 4, 1], // 82
    &[1, 1, 4, 2, 1, 2], // 83
    &[1, 2, 4, 1, 1, 2], // 84
    &[1, 2, 4, 2, 1, 1], // 85
    &[4, 1, 1, 2, 1, 2], // 86
    &[4, 2, 1, 1, 1, 2], // 87
    &[4, 2, 1, 2, 1, 1], // 88
    &[2, 1, 2, 1, 4, 1], // 89
    &[2, 1, 4, 1, 2, 1], // 90
    &[4, 1, 2, 1, 2, 1], // 91
    &[1, 1, 1, 1, 4, 3], // 92
    &[1, 1, 1, 3, 4, 1], // 93
    &[1, 3, 1, 1, 4, 1], // 94
    &[1, 1, 4, 1, 1, 3], // 95
    &[1, 1, 4, 3, 1, 1], // 96
    &[4, 1, 1, 1, 1, 3], // 97
    &[4, 1, 1, 3, 1, 1], // 98
    &[1, 1, 3, 1, 4, 1], // 99
    &[1, 1, 4, 1, 3, 1], // 100
    &[3, 1, 1, 1, 4, 1], // 101
    &[4, 1, 1, 1, 3, 1], // 102
    &[2, 1, 1, 4, 1, 2], // 103 Start A
    &[2, 1, 1, 2, 1, 4], // 104 Start B
    &[2, 1, 1, 2, 3, 2], // 105 Start C
    &[2, 3, 3, 1, 1, 1, 2], // 106 STOP
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_symbol_spans_eleven_modules_except_stop() {
        for (value, widths) in SYMBOL_WIDTHS.iter().enumerate() {
            let span: u8 = widths.iter().sum();
            if value == STOP {
                assert_eq!(span, 13, "STOP must span 13 modules");
            } else {
                assert_eq!(span, 11, "symbol {value} must span 11 modules");
            }
        }
    }

    #[test]
    fn every_symbol_has_three_bars_and_three_spaces() {
        for (value, widths) in SYMBOL_WIDTHS.iter().enumerate() {
            let expected = if value == STOP { 7 } else { 6 };
            assert_eq!(widths.len(), expected, "symbol {value} element count");
        }
    }
}
