/// Terminal drawing surface backed by a character buffer
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use prism3d_core::Canvas;
use std::io::{self, Write};

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// ASCII canvas: shades in [0, 1] become ramp characters.
///
/// Occlusion comes from the pipeline's painter's ordering, so there is no
/// depth buffer here; later plots simply overwrite earlier ones.
pub struct TermCanvas {
    width: usize,
    chars: Vec<char>,
}

impl TermCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            chars: vec![' '; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.chars.fill(' ');
    }

    /// Queue the buffer contents onto a terminal writer
    pub fn draw<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for row in self.chars.chunks(self.width) {
            for &c in row {
                writer.queue(SetForegroundColor(Self::color_for(c)))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    fn color_for(c: char) -> Color {
        match c {
            ' ' | '.' | ':' => Color::DarkGrey,
            '-' | '=' => Color::Grey,
            '+' | '*' => Color::White,
            _ => Color::Cyan,
        }
    }
}

impl Canvas for TermCanvas {
    fn width(&self) -> u32 {
        self.width as u32
    }

    fn height(&self) -> u32 {
        (self.chars.len() / self.width) as u32
    }

    fn plot(&mut self, x: i32, y: i32, shade: f32) {
        if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return;
        }
        let step = (shade.clamp(0.0, 1.0) * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        self.chars[y as usize * self.width + x as usize] = LUMINOSITY_RAMP[step];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade_maps_to_ramp() {
        let mut canvas = TermCanvas::new(4, 4);
        canvas.plot(0, 0, 0.0);
        canvas.plot(1, 0, 1.0);
        canvas.plot(2, 0, 7.0); // clamped
        assert_eq!(canvas.chars[0], ' ');
        assert_eq!(canvas.chars[1], '@');
        assert_eq!(canvas.chars[2], '@');
    }

    #[test]
    fn test_out_of_bounds_plot_ignored() {
        let mut canvas = TermCanvas::new(4, 4);
        canvas.plot(-1, 0, 1.0);
        canvas.plot(4, 0, 1.0);
        canvas.plot(0, 99, 1.0);
        assert!(canvas.chars.iter().all(|&c| c == ' '));
    }
}
