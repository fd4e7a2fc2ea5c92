//! Drawable widgets
//!
//! A layer owns a rectangle of the screen. Changing its content marks it
//! dirty; drawing clears the frame to the window background and paints the
//! content again.

use core::fmt;

use embedded_graphics::{
    draw_target::{DrawTarget, DrawTargetExt},
    geometry::{Point, Size},
    image::Image,
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::{BinaryColor, RgbColor},
    primitives::Rectangle,
    Drawable,
};
use embedded_text::{alignment::HorizontalAlignment, style::TextBoxStyleBuilder, TextBox};

use crate::{resources::Bitmap, ColorMode, Error};

/// Placement of a bitmap inside its layer frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alignment {
    Center,
    TopLeft,
    TopRight,
}

impl Alignment {
    /// Top left corner of an item of `size` placed within `frame`
    pub fn position(self, frame: &Rectangle, size: Size) -> Point {
        let free_w = frame.size.width.saturating_sub(size.width) as i32;
        let free_h = frame.size.height.saturating_sub(size.height) as i32;

        match self {
            Alignment::Center => frame.top_left + Point::new(free_w / 2, free_h / 2),
            Alignment::TopLeft => frame.top_left,
            Alignment::TopRight => frame.top_left + Point::new(free_w, 0),
        }
    }
}

pub trait Layer {
    /// Screen area owned by the layer
    fn frame(&self) -> Rectangle;

    /// Content changed since the last draw
    fn is_dirty(&self) -> bool;

    /// Clear the frame and paint the content
    fn draw<D>(&mut self, target: &mut D, background: ColorMode) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>;
}

/// Layer showing a single bitmap
pub struct BitmapLayer {
    frame: Rectangle,
    alignment: Alignment,
    bitmap: Option<Bitmap>,
    dirty: bool,
}

impl BitmapLayer {
    pub fn new(frame: Rectangle, alignment: Alignment) -> Self {
        Self {
            frame,
            alignment,
            bitmap: None,
            dirty: true,
        }
    }

    /// Replace the shown bitmap, releasing the previous one
    pub fn set_bitmap(&mut self, bitmap: Bitmap) {
        if self.bitmap != Some(bitmap) {
            self.bitmap = Some(bitmap);
            self.dirty = true;
        }
    }

    pub fn bitmap(&self) -> Option<&Bitmap> {
        self.bitmap.as_ref()
    }

    /// Where the bitmap's top left corner lands on screen
    pub fn bitmap_origin(&self) -> Option<Point> {
        self.bitmap
            .as_ref()
            .map(|bitmap| self.alignment.position(&self.frame, bitmap.size()))
    }
}

impl Layer for BitmapLayer {
    fn frame(&self) -> Rectangle {
        self.frame
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn draw<D>(&mut self, target: &mut D, background: ColorMode) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        target.fill_solid(&self.frame, background)?;

        if let (Some(bitmap), Some(origin)) = (self.bitmap.as_ref(), self.bitmap_origin()) {
            let raw = bitmap.image();
            let mut clipped = target.clipped(&self.frame);
            Image::new(&raw, origin).draw(&mut clipped.color_converted::<BinaryColor>())?;
        }

        self.dirty = false;
        Ok(())
    }
}

/// Layer showing a line of text, formatted into a fixed buffer of `N` bytes
pub struct TextLayer<const N: usize> {
    frame: Rectangle,
    font: &'static MonoFont<'static>,
    color: ColorMode,
    alignment: HorizontalAlignment,
    buf: [u8; N],
    len: usize,
    dirty: bool,
}

impl<const N: usize> TextLayer<N> {
    /// White, centered text
    pub fn new(frame: Rectangle, font: &'static MonoFont<'static>) -> Self {
        Self {
            frame,
            font,
            color: ColorMode::WHITE,
            alignment: HorizontalAlignment::Center,
            buf: [0; N],
            len: 0,
            dirty: true,
        }
    }

    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    /// Format new text into the layer.
    ///
    /// Text that does not fit leaves the layer unchanged.
    pub fn set_text(&mut self, args: fmt::Arguments<'_>) -> Result<(), Error> {
        let mut buf = [0u8; N];
        let len = format_no_std::show(&mut buf, args)?.len();

        if buf[..len] != self.buf[..self.len] {
            self.buf = buf;
            self.len = len;
            self.dirty = true;
        }
        Ok(())
    }

    pub fn text(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }
}

impl<const N: usize> Layer for TextLayer<N> {
    fn frame(&self) -> Rectangle {
        self.frame
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn draw<D>(&mut self, target: &mut D, background: ColorMode) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        target.fill_solid(&self.frame, background)?;

        let character_style = MonoTextStyle::new(self.font, self.color);
        let textbox_style = TextBoxStyleBuilder::new()
            .alignment(self.alignment)
            .build();
        TextBox::with_textbox_style(self.text(), self.frame, character_style, textbox_style)
            .draw(target)?;

        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mono_font::ascii::FONT_6X10;

    use super::*;
    use crate::{resources::ResourceId, testing::FrameBuffer};

    fn frame() -> Rectangle {
        Rectangle::new(Point::new(10, 20), Size::new(100, 40))
    }

    #[test]
    fn alignment_positions() {
        let size = Size::new(20, 10);
        assert_eq!(
            Alignment::Center.position(&frame(), size),
            Point::new(50, 35)
        );
        assert_eq!(
            Alignment::TopLeft.position(&frame(), size),
            Point::new(10, 20)
        );
        assert_eq!(
            Alignment::TopRight.position(&frame(), size),
            Point::new(90, 20)
        );
    }

    #[test]
    fn oversized_item_sticks_to_top_left() {
        let size = Size::new(200, 80);
        assert_eq!(
            Alignment::Center.position(&frame(), size),
            frame().top_left
        );
    }

    #[test]
    fn set_text_marks_dirty_only_on_change() {
        let mut layer: TextLayer<8> = TextLayer::new(frame(), &FONT_6X10);
        let mut fb = FrameBuffer::new();

        layer.set_text(format_args!("{}%", 42)).unwrap();
        assert_eq!(layer.text(), "42%");
        assert!(layer.is_dirty());

        layer.draw(&mut fb, ColorMode::BLACK).unwrap();
        assert!(!layer.is_dirty());

        layer.set_text(format_args!("{}%", 42)).unwrap();
        assert!(!layer.is_dirty());

        layer.set_text(format_args!("{}%", 43)).unwrap();
        assert!(layer.is_dirty());
    }

    #[test]
    fn overflow_keeps_previous_text() {
        let mut layer: TextLayer<4> = TextLayer::new(frame(), &FONT_6X10);
        layer.set_text(format_args!("100%")).unwrap();

        assert_eq!(
            layer.set_text(format_args!("discharging")),
            Err(Error::Format)
        );
        assert_eq!(layer.text(), "100%");
    }

    #[test]
    fn text_is_drawn_inside_frame() {
        let mut layer: TextLayer<8> = TextLayer::new(frame(), &FONT_6X10);
        let mut fb = FrameBuffer::new();
        layer.set_text(format_args!("12:34")).unwrap();
        layer.draw(&mut fb, ColorMode::BLACK).unwrap();

        assert!(fb.count(&frame(), ColorMode::WHITE) > 0);
        assert_eq!(fb.pixel(Point::new(0, 0)), ColorMode::RED);
        assert_eq!(fb.pixel(frame().top_left), ColorMode::BLACK);
    }

    #[test]
    fn replacing_bitmap_redraws() {
        let mut layer = BitmapLayer::new(frame(), Alignment::TopRight);
        let mut fb = FrameBuffer::new();
        assert!(layer.bitmap().is_none());

        layer.set_bitmap(Bitmap::from_resource(ResourceId::Batt0));
        layer.draw(&mut fb, ColorMode::BLACK).unwrap();
        assert!(!layer.is_dirty());
        assert_eq!(layer.bitmap_origin(), Some(Point::new(78, 20)));

        layer.set_bitmap(Bitmap::from_resource(ResourceId::Batt0));
        assert!(!layer.is_dirty());

        layer.set_bitmap(Bitmap::from_resource(ResourceId::Batt4));
        assert!(layer.is_dirty());
        assert_eq!(layer.bitmap().map(Bitmap::id), Some(ResourceId::Batt4));
    }

    #[test]
    fn bitmap_is_drawn_inside_frame() {
        let mut layer = BitmapLayer::new(frame(), Alignment::Center);
        let mut fb = FrameBuffer::new();
        layer.set_bitmap(Bitmap::from_resource(ResourceId::Sun));
        layer.draw(&mut fb, ColorMode::BLACK).unwrap();

        let icon = Rectangle::new(
            layer.bitmap_origin().unwrap(),
            ResourceId::Sun.size(),
        );
        assert!(fb.count(&icon, ColorMode::WHITE) > 0);
        assert_eq!(fb.count(&frame(), ColorMode::RED), 0);
    }
}
