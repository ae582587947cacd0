//! Path `d` attribute parsing, reduced to the straight-line command subset.
//!
//! Recognized commands: `M`/`m`, `L`/`l`, `H`/`h`, `V`/`v`, `Z`/`z`. Numbers
//! following a moveto continue as implicit linetos. Any other command letter
//! terminates interpretation; the segments collected so far are kept.

use log::warn;

use crate::types::{PathSegment, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Command(char),
    Number(f64),
}

/// Scan one number starting at `i`: optional sign, digits/decimal point,
/// optional exponent. Advances `i` past the consumed characters.
fn scan_number(chars: &[char], i: &mut usize) -> Option<f64> {
    let len = chars.len();
    let start = *i;
    let mut num = String::new();

    if *i < len && (chars[*i] == '-' || chars[*i] == '+') {
        num.push(chars[*i]);
        *i += 1;
    }

    let mut seen_dot = false;
    while *i < len {
        let ch = chars[*i];
        if ch.is_ascii_digit() {
            num.push(ch);
            *i += 1;
        } else if ch == '.' && !seen_dot {
            seen_dot = true;
            num.push(ch);
            *i += 1;
        } else {
            break;
        }
    }

    // Optional exponent, only consumed when digits follow
    if *i < len && (chars[*i] == 'e' || chars[*i] == 'E') {
        let mut j = *i + 1;
        let mut exp = String::from(chars[*i]);
        if j < len && (chars[j] == '-' || chars[j] == '+') {
            exp.push(chars[j]);
            j += 1;
        }
        let digits_from = j;
        while j < len && chars[j].is_ascii_digit() {
            exp.push(chars[j]);
            j += 1;
        }
        if j > digits_from {
            num.push_str(&exp);
            *i = j;
        }
    }

    match num.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            // Make sure a stray sign cannot stall the scanner
            if *i == start {
                *i += 1;
            }
            None
        }
    }
}

fn tokenize(data: &str) -> Vec<Token> {
    let chars: Vec<char> = data.chars().collect();
    let len = chars.len();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < len {
        let ch = chars[i];
        if ch.is_ascii_alphabetic() {
            tokens.push(Token::Command(ch));
            i += 1;
        } else if ch == '-' || ch == '+' || ch == '.' || ch.is_ascii_digit() {
            if let Some(n) = scan_number(&chars, &mut i) {
                tokens.push(Token::Number(n));
            }
        } else {
            // Whitespace and comma separators
            i += 1;
        }
    }

    tokens
}

/// Extract a flat number list and pair it into points (`points` attribute of
/// polyline/polygon). A trailing unpaired number is dropped.
pub fn parse_points(points_str: &str) -> Vec<Point> {
    let numbers: Vec<f64> = tokenize(points_str)
        .into_iter()
        .filter_map(|t| match t {
            Token::Number(n) => Some(n),
            Token::Command(_) => None,
        })
        .collect();

    numbers
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect()
}

/// Interpret a `d` attribute into straight-line subpaths.
pub fn parse_path_data(data: &str) -> Vec<PathSegment> {
    let mut segments: Vec<PathSegment> = Vec::new();
    let mut cursor = Point::new(0.0, 0.0);
    let mut subpath_start: Option<Point> = None;
    let mut command: Option<char> = None;

    let mut tokens = tokenize(data).into_iter();

    'outer: while let Some(token) = tokens.next() {
        match token {
            Token::Command(c @ ('M' | 'm' | 'L' | 'l' | 'H' | 'h' | 'V' | 'v')) => {
                command = Some(c);
            }
            Token::Command('Z' | 'z') => {
                if let Some(seg) = segments.last_mut() {
                    seg.closed = true;
                }
                if let Some(start) = subpath_start {
                    cursor = start;
                }
                command = None;
            }
            Token::Command(other) => {
                warn!("unsupported path command '{other}', dropping remaining path data");
                break;
            }
            Token::Number(n) => {
                let Some(cmd) = command else {
                    warn!("path data starts with a number, dropping remaining path data");
                    break;
                };

                let point = match cmd {
                    'M' | 'L' | 'm' | 'l' => {
                        let y = match tokens.next() {
                            Some(Token::Number(y)) => y,
                            _ => break 'outer,
                        };
                        if cmd.is_ascii_uppercase() {
                            Point::new(n, y)
                        } else {
                            Point::new(cursor.x + n, cursor.y + y)
                        }
                    }
                    'H' => Point::new(n, cursor.y),
                    'h' => Point::new(cursor.x + n, cursor.y),
                    'V' => Point::new(cursor.x, n),
                    'v' => Point::new(cursor.x, cursor.y + n),
                    _ => break 'outer,
                };

                if cmd == 'M' || cmd == 'm' {
                    segments.push(PathSegment::new(vec![point]));
                    subpath_start = Some(point);
                    // Further coordinate pairs are implicit linetos
                    command = Some(if cmd == 'M' { 'L' } else { 'l' });
                } else {
                    match segments.last_mut() {
                        Some(seg) => seg.points.push(point),
                        // Lineto without a preceding moveto starts at the origin cursor
                        None => segments.push(PathSegment::new(vec![cursor, point])),
                    }
                }
                cursor = point;
            }
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_points_comma_pairs() {
        let points = parse_points("0,0 10,0 10,10");
        assert_eq!(points.len(), 3);
        assert_eq!(points[1], Point::new(10.0, 0.0));
    }

    #[test]
    fn test_parse_points_whitespace_and_odd_count() {
        let points = parse_points("1 2 3 4 5");
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], Point::new(1.0, 2.0));
        assert_eq!(points[1], Point::new(3.0, 4.0));
    }

    #[test]
    fn test_parse_points_negative_without_separator() {
        let points = parse_points("10-5 20-15");
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], Point::new(10.0, -5.0));
        assert_eq!(points[1], Point::new(20.0, -15.0));
    }

    #[test]
    fn test_parse_path_absolute_lines() {
        let segments = parse_path_data("M10,10 L90,10 L90,90");
        assert_eq!(segments.len(), 1);
        assert_eq!(
            segments[0].points,
            vec![
                Point::new(10.0, 10.0),
                Point::new(90.0, 10.0),
                Point::new(90.0, 90.0)
            ]
        );
        assert!(!segments[0].closed);
    }

    #[test]
    fn test_parse_path_horizontal_vertical() {
        let segments = parse_path_data("M0,0 H10 V10 h-5 v5");
        assert_eq!(segments.len(), 1);
        assert_eq!(
            segments[0].points,
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(5.0, 10.0),
                Point::new(5.0, 15.0)
            ]
        );
    }

    #[test]
    fn test_parse_path_relative_moveto_and_implicit_lineto() {
        let segments = parse_path_data("m10,10 20,0 0,20");
        assert_eq!(segments.len(), 1);
        assert_eq!(
            segments[0].points,
            vec![
                Point::new(10.0, 10.0),
                Point::new(30.0, 10.0),
                Point::new(30.0, 30.0)
            ]
        );
    }

    #[test]
    fn test_parse_path_close() {
        let segments = parse_path_data("M0,0 L10,0 L10,10 Z");
        assert_eq!(segments.len(), 1);
        assert!(segments[0].closed);
    }

    #[test]
    fn test_parse_path_curve_terminates() {
        let segments = parse_path_data("M0,0 L10,0 V10 C20,20 30,30 40,40");
        assert_eq!(segments.len(), 1);
        assert_eq!(
            segments[0].points,
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0)
            ]
        );
        assert!(!segments[0].closed);
    }

    #[test]
    fn test_parse_path_multiple_subpaths() {
        let segments = parse_path_data("M0,0 L10,0 M20,20 L30,20 Z");
        assert_eq!(segments.len(), 2);
        assert!(!segments[0].closed);
        assert!(segments[1].closed);
        // Z returns the cursor to the subpath start
        assert_eq!(segments[1].points[0], Point::new(20.0, 20.0));
    }

    #[test]
    fn test_parse_path_empty() {
        assert!(parse_path_data("").is_empty());
        assert!(parse_path_data("   ").is_empty());
    }
}
