use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use vdxtree::{Diagram, Error, Object, Options, PathSegment, TextAlign, PAGE_WIDTH};

const NS_2003: &str = "http://schemas.microsoft.com/visio/2003/core";
const NS_2002: &str = "urn:schemas-microsoft-com:office:visio";

fn import(body: &str) -> Diagram {
    let text = format!("<VisioDocument xmlns='{}'>{}</VisioDocument>", NS_2003, body);
    Diagram::from_str(&text, &Options::default()).unwrap()
}

fn objects(diagram: &Diagram) -> Vec<&Object> {
    diagram
        .layers
        .iter()
        .flat_map(|l| l.objects.iter())
        .collect()
}

fn assert_near(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
}

#[test]
fn wrong_root_is_fatal() {
    let res = Diagram::from_str(
        &format!("<NotVisio xmlns='{}'/>", NS_2003),
        &Options::default(),
    );
    assert!(matches!(res, Err(Error::UnsupportedRoot)));
}

#[test]
fn unrecognized_namespace_is_fatal() {
    let res = Diagram::from_str(
        "<VisioDocument xmlns='urn:something-else'/>",
        &Options::default(),
    );
    assert!(matches!(res, Err(Error::UnsupportedRoot)));
}

#[test]
fn broken_xml_is_fatal() {
    let res = Diagram::from_str("<VisioDocument", &Options::default());
    assert!(matches!(res, Err(Error::ParsingFailed(_))));
}

#[test]
fn both_schema_revisions_are_accepted() {
    let body = "<Fonts><FontEntry ID='0' Name='Arial'/></Fonts><Pages/>";
    let text = format!("<VisioDocument xmlns='{}'>{}</VisioDocument>", NS_2002, body);
    assert!(Diagram::from_str(&text, &Options::default()).is_ok());
}

#[test]
fn open_run_becomes_a_polyline() {
    let diagram = import(
        "<Pages><Page ID='0'><Shapes>\
            <Shape ID='1' Type='Shape'>\
                <XForm><PinX>1</PinX><PinY>1</PinY>\
                    <LocPinX>0</LocPinX><LocPinY>0</LocPinY></XForm>\
                <Geom IX='0'><NoFill>1</NoFill>\
                    <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                    <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
                    <LineTo IX='3'><X>1</X><Y>1</Y></LineTo>\
                </Geom>\
            </Shape>\
        </Shapes></Page></Pages>",
    );

    let objects = objects(&diagram);
    assert_eq!(objects.len(), 1);
    match objects[0] {
        Object::Polyline(ref line) => {
            // One move plus n segments gives n+1 points, in order.
            assert_eq!(line.points.len(), 3);
            assert_near(line.points[0].x, 2.54);
            assert_near(line.points[0].y, 24.0 - 2.54);
            assert_near(line.points[1].x, 5.08);
            assert_near(line.points[1].y, 24.0 - 2.54);
            assert_near(line.points[2].x, 5.08);
            assert_near(line.points[2].y, 24.0 - 5.08);
        }
        other => panic!("expected a polyline, got {:?}", other),
    }
}

#[test]
fn filled_run_becomes_a_polygon_with_the_same_points() {
    let diagram = import(
        "<Pages><Page ID='0'><Shapes>\
            <Shape ID='1' Type='Shape'>\
                <XForm><PinX>1</PinX><PinY>1</PinY>\
                    <LocPinX>0</LocPinX><LocPinY>0</LocPinY></XForm>\
                <Fill><FillForegnd>#FF0000</FillForegnd>\
                    <FillPattern>1</FillPattern></Fill>\
                <Geom IX='0'>\
                    <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                    <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
                    <LineTo IX='3'><X>1</X><Y>1</Y></LineTo>\
                </Geom>\
            </Shape>\
        </Shapes></Page></Pages>",
    );

    let objects = objects(&diagram);
    assert_eq!(objects.len(), 1);
    match objects[0] {
        Object::Polygon(ref poly) => {
            assert_eq!(poly.points.len(), 3);
            assert_near(poly.points[0].x, 2.54);
            assert_near(poly.points[2].y, 24.0 - 5.08);
            let fill = poly.fill.expect("polygon must keep its fill");
            assert_eq!((fill.red, fill.green, fill.blue), (255, 0, 0));
        }
        other => panic!("expected a polygon, got {:?}", other),
    }
}

#[test]
fn single_arc_row_becomes_an_arc() {
    // A half circle: chord = diameter, bulge = radius.
    let diagram = import(
        "<Pages><Page ID='0'><Shapes>\
            <Shape ID='1' Type='Shape'>\
                <Geom IX='0'><NoFill>1</NoFill>\
                    <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                    <ArcTo IX='2'><X>2</X><Y>0</Y><A>1</A></ArcTo>\
                </Geom>\
            </Shape>\
        </Shapes></Page></Pages>",
    );

    let objects = objects(&diagram);
    assert_eq!(objects.len(), 1);
    match objects[0] {
        Object::Arc(ref arc) => {
            assert_near(arc.start.x, 0.0);
            assert_near(arc.start.y, 24.0);
            assert_near(arc.end.x, 5.08);
            assert_near(arc.end.y, 24.0);
            // The known radius, scaled into diagram space.
            assert_near(arc.radius, 2.54);
            assert_near(arc.curve_distance, 2.54);
        }
        other => panic!("expected an arc, got {:?}", other),
    }
}

#[test]
fn one_dimensional_endpoints_override_the_transform() {
    let diagram = import(
        "<Pages><Page ID='0'><Shapes>\
            <Shape ID='1' Type='Shape'>\
                <XForm><PinX>5</PinX><PinY>5</PinY>\
                    <LocPinX>0</LocPinX><LocPinY>0</LocPinY></XForm>\
                <XForm1D><BeginX>0</BeginX><BeginY>0</BeginY>\
                    <EndX>1</EndX><EndY>1</EndY></XForm1D>\
                <Line><LinePattern>1</LinePattern>\
                    <BeginArrow>1</BeginArrow><BeginArrowSize>0</BeginArrowSize>\
                    <EndArrow>4</EndArrow><EndArrowSize>2</EndArrowSize></Line>\
                <Geom IX='0'><NoFill>1</NoFill>\
                    <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                    <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
                </Geom>\
            </Shape>\
        </Shapes></Page></Pages>",
    );

    let objects = objects(&diagram);
    assert_eq!(objects.len(), 1);
    match objects[0] {
        Object::Line(ref line) => {
            // The 1-D endpoints place the line; the pin does not move it.
            assert_near(line.start.x, 0.0);
            assert_near(line.start.y, 24.0);
            assert_near(line.end.x, 2.54);
            assert_near(line.end.y, 24.0 - 2.54);

            let begin = line.start_arrow.expect("begin arrow");
            let end = line.end_arrow.expect("end arrow");
            assert!(end.length > begin.length);
        }
        other => panic!("expected a line, got {:?}", other),
    }
}

#[test]
fn mixed_rows_become_a_bezier_path() {
    let diagram = import(
        "<Pages><Page ID='0'><Shapes>\
            <Shape ID='1' Type='Shape'>\
                <Geom IX='0'><NoFill>1</NoFill>\
                    <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                    <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
                    <ArcTo IX='3'><X>2</X><Y>1</Y><A>0.2</A></ArcTo>\
                </Geom>\
            </Shape>\
        </Shapes></Page></Pages>",
    );

    let objects = objects(&diagram);
    assert_eq!(objects.len(), 1);
    match objects[0] {
        Object::Bezier(ref bezier) => {
            assert_eq!(bezier.segments.len(), 3);
            assert!(matches!(bezier.segments[0], PathSegment::MoveTo { .. }));
            assert!(matches!(bezier.segments[1], PathSegment::LineTo { .. }));
            assert!(matches!(bezier.segments[2], PathSegment::CurveTo { .. }));
        }
        other => panic!("expected a bezier, got {:?}", other),
    }
}

#[test]
fn filled_mixed_rows_become_a_beziergon() {
    let diagram = import(
        "<Pages><Page ID='0'><Shapes>\
            <Shape ID='1' Type='Shape'>\
                <Fill><FillForegnd>#0000FF</FillForegnd>\
                    <FillPattern>1</FillPattern></Fill>\
                <Geom IX='0'>\
                    <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                    <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
                    <ArcTo IX='3'><X>0</X><Y>0</Y><A>0.3</A></ArcTo>\
                </Geom>\
            </Shape>\
        </Shapes></Page></Pages>",
    );

    let objects = objects(&diagram);
    assert_eq!(objects.len(), 1);
    assert!(matches!(objects[0], Object::Beziergon(_)));
}

#[test]
fn ellipse_row_becomes_an_ellipse() {
    let diagram = import(
        "<Pages><Page ID='0'><Shapes>\
            <Shape ID='1' Type='Shape'>\
                <Geom IX='0'>\
                    <MoveTo IX='1'><X>2</X><Y>1</Y></MoveTo>\
                    <Ellipse IX='2'><X>1</X><Y>1</Y>\
                        <A>2</A><B>1</B><C>1</C><D>1.5</D></Ellipse>\
                </Geom>\
            </Shape>\
        </Shapes></Page></Pages>",
    );

    let objects = objects(&diagram);
    assert_eq!(objects.len(), 1);
    match objects[0] {
        Object::Ellipse(ref ellipse) => {
            assert_near(ellipse.center.x, 2.54);
            assert_near(ellipse.center.y, 24.0 - 2.54);
            assert_near(ellipse.width, 2.0 * 2.54);
            assert_near(ellipse.height, 1.0 * 2.54);
        }
        other => panic!("expected an ellipse, got {:?}", other),
    }
}

#[test]
fn group_members_share_the_group_translation() {
    let member = |id: u32| {
        format!(
            "<Shape ID='{}' Type='Shape'>\
                <XForm><PinX>0</PinX><PinY>0</PinY>\
                    <LocPinX>0</LocPinX><LocPinY>0</LocPinY></XForm>\
                <Geom IX='0'><NoFill>1</NoFill>\
                    <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                    <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
                </Geom>\
            </Shape>",
            id
        )
    };

    let diagram = import(&format!(
        "<Pages><Page ID='0'><Shapes>\
            <Shape ID='1' Type='Group'>\
                <XForm><PinX>1</PinX><PinY>1</PinY>\
                    <LocPinX>0</LocPinX><LocPinY>0</LocPinY></XForm>\
                <Shapes>{}{}</Shapes>\
            </Shape>\
        </Shapes></Page></Pages>",
        member(2),
        member(3)
    ));

    let objects = objects(&diagram);
    assert_eq!(objects.len(), 1);
    match objects[0] {
        Object::Group(ref group) => {
            assert_eq!(group.children.len(), 2);
            for child in &group.children {
                match child {
                    Object::Line(line) => {
                        // Offset by the group translation (1, 1).
                        assert_near(line.start.x, 2.54);
                        assert_near(line.start.y, 24.0 - 2.54);
                        assert_near(line.end.x, 5.08);
                    }
                    other => panic!("expected a line, got {:?}", other),
                }
            }
        }
        other => panic!("expected a group, got {:?}", other),
    }
}

#[test]
fn deleted_shapes_and_guides_are_never_plotted() {
    let diagram = import(
        "<Pages><Page ID='0'><Shapes>\
            <Shape ID='1' Type='Shape' Del='1'>\
                <Geom IX='0'><NoFill>1</NoFill>\
                    <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                    <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
                </Geom>\
            </Shape>\
            <Shape ID='2' Type='Guide'>\
                <Geom IX='0'><NoFill>1</NoFill>\
                    <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                    <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
                </Geom>\
            </Shape>\
            <Shape ID='3' Type='Shape'>\
                <Geom IX='0'><NoFill>1</NoFill>\
                    <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                    <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
                </Geom>\
            </Shape>\
        </Shapes></Page></Pages>",
    );

    assert_eq!(objects(&diagram).len(), 1);
}

#[test]
fn pages_lay_out_left_to_right() {
    let rect = |pin_x: f64, pin_y: f64| {
        format!(
            "<Shape ID='1' Type='Shape'>\
                <XForm><PinX>{}</PinX><PinY>{}</PinY>\
                    <LocPinX>0</LocPinX><LocPinY>0</LocPinY></XForm>\
                <Fill><FillForegnd>#00FF00</FillForegnd>\
                    <FillPattern>1</FillPattern></Fill>\
                <Geom IX='0'>\
                    <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                    <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
                    <LineTo IX='3'><X>1</X><Y>2</Y></LineTo>\
                    <LineTo IX='4'><X>0</X><Y>2</Y></LineTo>\
                    <LineTo IX='5'><X>0</X><Y>0</Y></LineTo>\
                </Geom>\
            </Shape>",
            pin_x, pin_y
        )
    };

    let diagram = import(&format!(
        "<Pages>\
            <Page ID='0'><Shapes>{}</Shapes></Page>\
            <Page ID='1'><Shapes>{}</Shapes></Page>\
        </Pages>",
        rect(1.0, 1.0),
        rect(1.0, 3.0)
    ));

    let objects = objects(&diagram);
    assert_eq!(objects.len(), 2);
    let (a, b) = match (objects[0], objects[1]) {
        (Object::Polygon(a), Object::Polygon(b)) => (a, b),
        other => panic!("expected two polygons, got {:?}", other),
    };

    // Same pin x, so the horizontal shift is exactly one page width.
    for (pa, pb) in a.points.iter().zip(b.points.iter()) {
        assert_near(pb.x - pa.x, PAGE_WIDTH);
    }

    // The declared source height of 2 scales by the unit ratio.
    let height = |points: &[vdxtree::Point]| {
        let min = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        max - min
    };
    assert_near(height(&a.points), 2.0 * 2.54);
    assert_near(height(&b.points), 2.0 * 2.54);
}

#[test]
fn layers_are_created_in_reverse_declaration_order() {
    let diagram = import(
        "<Pages><Page ID='0'>\
            <PageSheet>\
                <Layer IX='0'><Name>Front</Name></Layer>\
                <Layer IX='1'><Name>Back</Name></Layer>\
            </PageSheet>\
            <Shapes>\
                <Shape ID='1' Type='Shape'>\
                    <Geom IX='0'><NoFill>1</NoFill>\
                        <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                        <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
                    </Geom>\
                </Shape>\
            </Shapes>\
        </Page></Pages>",
    );

    let names: Vec<_> = diagram.layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["Back", "Front"]);

    // Without a membership record the shape lands on the active
    // (last-created) layer.
    assert!(diagram.layers[0].objects.is_empty());
    assert_eq!(diagram.layers[1].objects.len(), 1);
}

#[test]
fn layer_membership_routes_objects() {
    let diagram = import(
        "<Pages><Page ID='0'>\
            <PageSheet>\
                <Layer IX='0'><Name>Front</Name></Layer>\
                <Layer IX='1'><Name>Back</Name></Layer>\
            </PageSheet>\
            <Shapes>\
                <Shape ID='1' Type='Shape'>\
                    <LayerMem><LayerMember>0</LayerMember></LayerMem>\
                    <Geom IX='0'><NoFill>1</NoFill>\
                        <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                        <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
                    </Geom>\
                </Shape>\
                <Shape ID='2' Type='Shape'>\
                    <LayerMem><LayerMember>7</LayerMember></LayerMem>\
                    <Geom IX='0'><NoFill>1</NoFill>\
                        <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                        <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
                    </Geom>\
                </Shape>\
            </Shapes>\
        </Page></Pages>",
    );

    // Membership 0 names the first created layer; an out-of-range index
    // falls back to the active one.
    assert_eq!(diagram.layers[0].objects.len(), 1);
    assert_eq!(diagram.layers[1].objects.len(), 1);
}

#[test]
fn color_table_indices_resolve_and_degrade() {
    let diagram = import(
        "<Colors>\
            <ColorEntry IX='0' RGB='#112233'/>\
            <ColorEntry IX='3' RGB='#445566'/>\
        </Colors>\
        <Pages><Page ID='0'><Shapes>\
            <Shape ID='1' Type='Shape'>\
                <Line><LinePattern>1</LinePattern><LineColor>3</LineColor></Line>\
                <Geom IX='0'><NoFill>1</NoFill>\
                    <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                    <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
                </Geom>\
            </Shape>\
            <Shape ID='2' Type='Shape'>\
                <Line><LinePattern>1</LinePattern><LineColor>9</LineColor></Line>\
                <Geom IX='0'><NoFill>1</NoFill>\
                    <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                    <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
                </Geom>\
            </Shape>\
        </Shapes></Page></Pages>",
    );

    let objects = objects(&diagram);
    assert_eq!(objects.len(), 2);
    match (objects[0], objects[1]) {
        (Object::Line(a), Object::Line(b)) => {
            assert_eq!(
                (a.stroke.color.red, a.stroke.color.green, a.stroke.color.blue),
                (0x44, 0x55, 0x66)
            );
            // Out-of-range indices degrade to black.
            assert_eq!(
                (b.stroke.color.red, b.stroke.color.green, b.stroke.color.blue),
                (0, 0, 0)
            );
        }
        other => panic!("expected two lines, got {:?}", other),
    }
}

#[test]
fn styles_cascade_through_divergent_parents() {
    let diagram = import(
        "<StyleSheets>\
            <StyleSheet ID='0'/>\
            <StyleSheet ID='2' LineStyle='0' FillStyle='3'>\
                <Line><LineWeight>0.1</LineWeight>\
                    <LinePattern>1</LinePattern>\
                    <LineColor>#00FF00</LineColor></Line>\
            </StyleSheet>\
            <StyleSheet ID='3'>\
                <Fill><FillForegnd>#AB0000</FillForegnd>\
                    <FillPattern>1</FillPattern></Fill>\
            </StyleSheet>\
            <StyleSheet ID='4' LineStyle='2' FillStyle='2'/>\
        </StyleSheets>\
        <Pages><Page ID='0'><Shapes>\
            <Shape ID='1' Type='Shape' LineStyle='4' FillStyle='4'>\
                <Geom IX='0'>\
                    <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                    <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
                    <LineTo IX='3'><X>1</X><Y>1</Y></LineTo>\
                </Geom>\
            </Shape>\
        </Shapes></Page></Pages>",
    );

    let objects = objects(&diagram);
    assert_eq!(objects.len(), 1);
    match objects[0] {
        Object::Polygon(ref poly) => {
            // Line resolves on sheet 2, fill one step further on sheet 3.
            let stroke = poly.stroke.as_ref().expect("stroke");
            assert_eq!((stroke.color.green, stroke.color.red), (255, 0));
            assert_near(stroke.width, 0.1 * 2.54);
            let fill = poly.fill.expect("fill");
            assert_eq!((fill.red, fill.green, fill.blue), (0xAB, 0, 0));
        }
        other => panic!("expected a polygon, got {:?}", other),
    }
}

#[test]
fn master_supplies_missing_style_records() {
    let diagram = import(
        "<Masters>\
            <Master ID='5'>\
                <Shapes>\
                    <Shape ID='1' Type='Shape'>\
                        <Line><LinePattern>1</LinePattern>\
                            <LineColor>#123456</LineColor></Line>\
                    </Shape>\
                </Shapes>\
            </Master>\
        </Masters>\
        <Pages><Page ID='0'><Shapes>\
            <Shape ID='1' Type='Shape' Master='5'>\
                <Geom IX='0'><NoFill>1</NoFill>\
                    <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                    <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
                </Geom>\
            </Shape>\
        </Shapes></Page></Pages>",
    );

    let objects = objects(&diagram);
    assert_eq!(objects.len(), 1);
    match objects[0] {
        Object::Line(ref line) => {
            assert_eq!(
                (
                    line.stroke.color.red,
                    line.stroke.color.green,
                    line.stroke.color.blue
                ),
                (0x12, 0x34, 0x56)
            );
        }
        other => panic!("expected a line, got {:?}", other),
    }
}

#[test]
fn text_plots_after_geometry() {
    let diagram = import(
        "<FaceNames><FaceName ID='2' Name='Courier'/></FaceNames>\
        <Pages><Page ID='0'><Shapes>\
            <Shape ID='1' Type='Shape'>\
                <XForm><PinX>1</PinX><PinY>1</PinY>\
                    <LocPinX>0</LocPinX><LocPinY>0</LocPinY></XForm>\
                <Char><Font>2</Font><Size>0.25</Size>\
                    <Color>#808080</Color></Char>\
                <Para><HorzAlign>1</HorzAlign></Para>\
                <Fill><FillForegnd>#FFFFFF</FillForegnd>\
                    <FillPattern>1</FillPattern></Fill>\
                <Geom IX='0'>\
                    <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                    <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
                    <LineTo IX='3'><X>1</X><Y>1</Y></LineTo>\
                </Geom>\
                <Text>Hello\u{2028}World</Text>\
            </Shape>\
        </Shapes></Page></Pages>",
    );

    let objects = objects(&diagram);
    assert_eq!(objects.len(), 2);
    assert!(matches!(objects[0], Object::Polygon(_)));
    match objects[1] {
        Object::Text(ref text) => {
            assert_eq!(text.content, "Hello\nWorld");
            assert_eq!(text.font_family, "Courier");
            assert_eq!(text.align, TextAlign::Center);
            assert_near(text.size, 0.25 * 2.54);
            assert_eq!(text.color.red, 0x80);
            assert_near(text.position.x, 2.54);
        }
        other => panic!("expected a text, got {:?}", other),
    }
}

#[test]
fn text_survives_degenerate_geometry() {
    let diagram = import(
        "<Pages><Page ID='0'><Shapes>\
            <Shape ID='1' Type='Shape'>\
                <Geom IX='0'><NoFill>1</NoFill><NoLine>1</NoLine>\
                    <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                    <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
                </Geom>\
                <Text>still here</Text>\
            </Shape>\
        </Shapes></Page></Pages>",
    );

    let objects = objects(&diagram);
    assert_eq!(objects.len(), 1);
    assert!(matches!(objects[0], Object::Text(_)));
}

#[test]
fn unknown_elements_do_not_abort_their_parent() {
    let diagram = import(
        "<SomethingNew><Inner/></SomethingNew>\
        <Pages><Page ID='0'><Shapes>\
            <Shape ID='1' Type='Shape'>\
                <FutureRecord answer='42'><Nested/></FutureRecord>\
                <Geom IX='0'><NoFill>1</NoFill>\
                    <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                    <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
                </Geom>\
            </Shape>\
        </Shapes></Page></Pages>",
    );

    assert_eq!(objects(&diagram).len(), 1);
}

#[test]
fn abort_flag_stops_plotting() {
    let flag = Arc::new(AtomicBool::new(true));
    let opt = Options {
        abort: Some(flag.clone()),
        ..Options::default()
    };
    flag.store(true, Ordering::Relaxed);

    let text = format!(
        "<VisioDocument xmlns='{}'>\
            <Pages><Page ID='0'><Shapes>\
                <Shape ID='1' Type='Shape'>\
                    <Geom IX='0'><NoFill>1</NoFill>\
                        <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
                        <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
                    </Geom>\
                </Shape>\
            </Shapes></Page></Pages>\
        </VisioDocument>",
        NS_2003
    );

    let diagram = Diagram::from_str(&text, &opt).unwrap();
    assert_eq!(objects(&diagram).len(), 0);
}

#[test]
fn empty_geometry_yields_no_object() {
    let diagram = import(
        "<Pages><Page ID='0'><Shapes>\
            <Shape ID='1' Type='Shape'><Geom IX='0'/></Shape>\
        </Shapes></Page></Pages>",
    );
    assert_eq!(objects(&diagram).len(), 0);
}

#[test]
fn background_pages_do_not_advance_the_page_cursor() {
    let line = "<Shape ID='1' Type='Shape'>\
        <Geom IX='0'><NoFill>1</NoFill>\
            <MoveTo IX='1'><X>0</X><Y>0</Y></MoveTo>\
            <LineTo IX='2'><X>1</X><Y>0</Y></LineTo>\
        </Geom>\
    </Shape>";

    let diagram = import(&format!(
        "<Pages>\
            <Page ID='0' Background='1'><Shapes>{}</Shapes></Page>\
            <Page ID='1'><Shapes>{}</Shapes></Page>\
        </Pages>",
        line, line
    ));

    let objects = objects(&diagram);
    assert_eq!(objects.len(), 2);
    match (objects[0], objects[1]) {
        (Object::Line(a), Object::Line(b)) => {
            // Both pages occupy the same horizontal band.
            assert_near(a.start.x, b.start.x);
        }
        other => panic!("expected two lines, got {:?}", other),
    }
}
