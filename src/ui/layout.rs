use ratatui::layout::Rect;

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let target_w = (area.width.saturating_mul(percent_x.min(100)) / 100).min(area.width);
    let target_h = (area.height.saturating_mul(percent_y.min(100)) / 100).min(area.height);

    let left = area.x + (area.width.saturating_sub(target_w)) / 2;
    let top = area.y + (area.height.saturating_sub(target_h)) / 2;

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(50, 80, area);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
        assert!(rect.x >= area.x && rect.y >= area.y);
    }

    #[test]
    fn centered_rect_caps_percentages() {
        let area = Rect::new(0, 0, 30, 10);
        let rect = centered_rect(150, 150, area);
        assert_eq!(rect, area);
    }
}
