use boxwrap::*;

#[test]
fn test_corner_codes() {
    assert_eq!(Corner::try_from(1).unwrap(), Corner::TopLeft);
    assert_eq!(Corner::try_from(2).unwrap(), Corner::TopRight);
    assert_eq!(Corner::try_from(3).unwrap(), Corner::BottomLeft);
    assert_eq!(Corner::try_from(4).unwrap(), Corner::BottomRight);
    assert_eq!(Corner::try_from(5).unwrap(), Corner::Center);

    for code in [0, 6, 255] {
        match Corner::try_from(code) {
            Err(BoxWrapError::InvalidCorner(c)) => assert_eq!(c, code),
            other => panic!("Expected InvalidCorner, got {:?}", other),
        }
    }
}

#[test]
fn test_direction_codes() {
    assert_eq!(Direction::try_from(1).unwrap(), Direction::Left);
    assert_eq!(Direction::try_from(2).unwrap(), Direction::Right);
    assert_eq!(Direction::try_from(3).unwrap(), Direction::Up);
    assert_eq!(Direction::try_from(4).unwrap(), Direction::Down);
    assert!(matches!(
        Direction::try_from(5),
        Err(BoxWrapError::InvalidDirection(5))
    ));
}

#[test]
fn test_rotation_degrees() {
    for degrees in [0, 90, 180, 270] {
        assert_eq!(Rotation::from_degrees(degrees).unwrap().degrees(), degrees);
    }
    assert!(matches!(
        Rotation::from_degrees(45),
        Err(BoxWrapError::InvalidRotation(45))
    ));
    assert!(Rotation::Clockwise90.swaps_axes());
    assert!(Rotation::Clockwise270.swaps_axes());
    assert!(!Rotation::Clockwise180.swaps_axes());
    assert!(!Rotation::default().swaps_axes());
}

#[test]
fn test_corner_points() {
    let rect = PixelRect::new(10, 20, 30, 41);
    assert_eq!(Corner::TopLeft.point_of(&rect), Point::new(10, 20));
    assert_eq!(Corner::TopRight.point_of(&rect), Point::new(40, 20));
    assert_eq!(Corner::BottomLeft.point_of(&rect), Point::new(10, 61));
    assert_eq!(Corner::BottomRight.point_of(&rect), Point::new(40, 61));
    assert_eq!(Corner::Center.point_of(&rect), Point::new(25, 40));
}

#[test]
fn test_center_of_negative_rect_floors() {
    let rect = PixelRect::from_edges(-5, -5, 0, 0);
    assert_eq!(rect.center(), Point::new(-3, -3));
}

#[test]
fn test_rect_fits_within() {
    let size = SheetSize::new(100, 50);
    assert!(PixelRect::new(0, 0, 100, 50).fits_within(size));
    assert!(!PixelRect::new(-1, 0, 10, 10).fits_within(size));
    assert!(!PixelRect::new(95, 45, 10, 10).fits_within(size));
}

#[test]
fn test_half_height_rounds_down() {
    assert_eq!(BoxDimensions::new(10, 1229, 10).half_height(), 614);
    assert_eq!(BoxDimensions::from_mm(75.0, 104.0, 100.0).half_height(), 614);
}

#[test]
fn test_face_labels() {
    let labels: Vec<&str> = [Face::Top, Face::Left, Face::Front, Face::Right, Face::Back, Face::Bottom]
        .into_iter()
        .map(Face::label)
        .collect();
    assert_eq!(labels, ["TOP", "LEFT", "FRONT", "RIGHT", "BACK", "BOTTOM"]);
}

#[test]
fn test_sheet_size_display_truncates_mm() {
    assert_eq!(
        SheetSize::new(4134, 3590).to_string(),
        "4134px x 3590px (350mm x 303mm)"
    );
    assert_eq!(SheetSize::new(11, 0).to_string(), "11px x 0px (0mm x 0mm)");
}
