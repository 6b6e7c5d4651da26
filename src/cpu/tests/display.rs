// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Exercises the sprite engine in [Screen]
use super::*;
use crate::cpu::screen::{HEIGHT, WIDTH};

fn lit(screen: &Screen) -> Vec<(usize, usize)> {
    screen
        .pixels()
        .iter()
        .enumerate()
        .filter(|(_, &p)| p != 0)
        .map(|(i, _)| (i % WIDTH, i / WIDTH))
        .collect()
}

#[test]
fn blank() {
    let mut screen = Screen::new();
    assert!(screen.pixels().iter().all(|&p| p == 0));
    assert_eq!(WIDTH * HEIGHT, screen.pixels().len());
    assert!(!screen.take_redraw());
}

#[test]
fn draw_sets_redraw_even_for_empty_sprite() {
    let mut screen = Screen::new();
    assert!(!screen.draw(0, 0, &[0, 0, 0], false));
    assert!(screen.take_redraw());
    assert!(!screen.take_redraw());
    assert_eq!(Screen::new(), screen);
}

#[test]
fn xor_and_collision() {
    let mut screen = Screen::new();
    assert!(!screen.draw(10, 10, &[0x80], false));
    assert_eq!(1, screen.pixel(10, 10));
    assert!(screen.draw(10, 10, &[0x80], false));
    assert_eq!(0, screen.pixel(10, 10));
    assert!(!screen.draw(10, 10, &[0x80], false));
}

#[test]
fn collision_is_sticky_within_a_draw() {
    let mut screen = Screen::new();
    screen.draw(0, 0, &[0x80], false);
    // first row collides, second row does not
    assert!(screen.draw(0, 0, &[0x80, 0x80], false));
    assert_eq!(vec![(0, 1)], lit(&screen));
}

#[test]
fn wraps_horizontally() {
    let mut screen = Screen::new();
    screen.draw(60, 0, &[0xff], false);
    assert_eq!(
        vec![(0, 0), (1, 0), (2, 0), (3, 0), (60, 0), (61, 0), (62, 0), (63, 0)],
        lit(&screen)
    );
}

#[test]
fn wraps_vertically() {
    let mut screen = Screen::new();
    screen.draw(0, 31, &[0x80, 0x80], false);
    assert_eq!(vec![(0, 0), (0, 31)], lit(&screen));
}

#[test]
fn origin_wraps_before_drawing() {
    let mut screen = Screen::new();
    screen.draw(64 + 5, 32 + 7, &[0x80], false);
    assert_eq!(vec![(5, 7)], lit(&screen));
}

#[test]
fn clipping() {
    let mut screen = Screen::new();
    screen.draw(60, 31, &[0xff, 0xff], true);
    assert_eq!(vec![(60, 31), (61, 31), (62, 31), (63, 31)], lit(&screen));
}

#[test]
fn clear() {
    let mut screen = Screen::new();
    screen.draw(0, 0, &[0xff; 15], false);
    screen.take_redraw();
    screen.clear();
    assert!(screen.take_redraw());
    assert!(lit(&screen).is_empty());
}

#[test]
fn text() {
    let mut screen = Screen::new();
    screen.draw(0, 0, &[0xc0], false);
    let text = screen.to_string();
    assert_eq!(HEIGHT, text.lines().count());
    assert!(text.starts_with("00|██ "));
}
