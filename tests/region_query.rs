use std::cell::{Cell, RefCell};

use stravatools::{
    BoundingBox, Coord, Error, OverpassClient, PointOfInterest,
    http::{HttpRequest, HttpResponse, HttpTransport, RequestBody},
    is_near_polyline,
    settings::{OverpassSettings, RetryPolicy},
    tiles_visited_by_polyline,
};

/// Reads the box back out of the `poly:"..."` filter of a query.
fn box_of(request: &HttpRequest) -> BoundingBox {
    let Some(RequestBody::Text(query)) = &request.body else {
        panic!("query must be sent as a text body");
    };
    let start = query.find("poly:\"").expect("poly filter") + "poly:\"".len();
    let end = start + query[start..].find('"').expect("closing quote");
    let n: Vec<f64> = query[start..end]
        .split_whitespace()
        .map(|v| v.parse().unwrap())
        .collect();
    // NW, NE, SE, SW
    BoundingBox::new(Coord::new(n[6], n[7]), Coord::new(n[2], n[3]))
}

fn element(id: i64, point: &Coord) -> String {
    format!(
        r#"{{"type":"node","id":{},"lat":{},"lon":{},"tags":{{"mountain_pass":"yes"}}}}"#,
        id, point.lat, point.lon
    )
}

/// 429 for any box larger than `max_area`, otherwise the known passes it contains.
struct AreaLimited {
    max_area: f64,
    passes: Vec<Coord>,
    calls: Cell<usize>,
    rate_limited: Cell<usize>,
}

impl AreaLimited {
    fn new(max_area: f64, passes: Vec<Coord>) -> Self {
        AreaLimited {
            max_area,
            passes,
            calls: Cell::new(0),
            rate_limited: Cell::new(0),
        }
    }
}

impl HttpTransport for AreaLimited {
    fn send(&self, request: &HttpRequest) -> stravatools::Result<HttpResponse> {
        self.calls.set(self.calls.get() + 1);
        let bbox = box_of(request);
        if bbox.area() > self.max_area {
            self.rate_limited.set(self.rate_limited.get() + 1);
            return Ok(HttpResponse::new(429, "rate_limited"));
        }
        let found: Vec<String> = self
            .passes
            .iter()
            .enumerate()
            .filter(|(_, p)| bbox.contains(p))
            .map(|(i, p)| element(i as i64, p))
            .collect();
        Ok(HttpResponse::new(200, format!(r#"{{"elements":[{}]}}"#, found.join(","))))
    }
}

/// Same answer for every request.
struct Canned {
    body: String,
    requests: RefCell<Vec<HttpRequest>>,
}

impl HttpTransport for Canned {
    fn send(&self, request: &HttpRequest) -> stravatools::Result<HttpResponse> {
        self.requests.borrow_mut().push(request.clone());
        Ok(HttpResponse::new(200, self.body.clone()))
    }
}

fn settings() -> OverpassSettings {
    OverpassSettings {
        url: "http://overpass.test/api/interpreter".to_string(),
        retry: RetryPolicy::immediate(3),
        ..Default::default()
    }
}

fn one_degree_box() -> BoundingBox {
    BoundingBox::new(Coord::new(45.0, 6.0), Coord::new(46.0, 7.0))
}

#[test]
fn subdivision_calls_every_quad_tree_node_once() {
    let passes = vec![
        Coord::new(45.1, 6.1),
        Coord::new(45.6, 6.9),
        Coord::new(45.9, 6.2),
        // Corner shared by four leaves.
        Coord::new(45.5, 6.5),
        // Edge shared by two leaves.
        Coord::new(45.75, 6.1),
    ];
    // 1/16 square degree leaves: two levels of splitting.
    let transport = AreaLimited::new(0.07, passes);
    let client = OverpassClient::with_transport(&transport, settings());

    let points = client.query_points_of_interest(&one_degree_box()).unwrap();

    assert_eq!(transport.calls.get(), 1 + 4 + 16);
    assert_eq!(transport.rate_limited.get(), 1 + 4);
    assert_eq!(points.len(), 1 + 1 + 1 + 4 + 2);

    let count = |id: i64| points.iter().filter(|p| p.external_id == id).count();
    assert_eq!(count(3), 4);
    assert_eq!(count(4), 2);
    assert_eq!(count(0), 1);
}

#[test]
fn no_subdivision_when_box_is_small_enough() {
    let transport = AreaLimited::new(2.0, vec![Coord::new(45.5, 6.5)]);
    let client = OverpassClient::with_transport(&transport, settings());

    let points = client.query_points_of_interest(&one_degree_box()).unwrap();
    assert_eq!(transport.calls.get(), 1);
    assert_eq!(points.len(), 1);
}

#[test]
fn subdivision_limit_is_reported() {
    let transport = AreaLimited::new(0.0, vec![]);
    let client = OverpassClient::with_transport(
        &transport,
        OverpassSettings {
            max_depth: 3,
            ..settings()
        },
    );

    let err = client.query_points_of_interest(&one_degree_box()).unwrap_err();
    assert!(matches!(err, Error::SubdivisionLimit { depth: 3, .. }));
    // Root, then the first branch down to depth 3.
    assert_eq!(transport.calls.get(), 4);
}

#[test]
fn named_pass_with_elevation() {
    let transport = Canned {
        body: concat!(
            r#"{"elements":[{"type":"node","id":123,"lat":45.05,"lon":6.05,"#,
            r#""tags":{"name":"Col Test","ele":"1800"}}]}"#
        )
        .to_string(),
        requests: RefCell::new(Vec::new()),
    };
    let client = OverpassClient::with_transport(&transport, settings());
    let bbox = BoundingBox::new(Coord::new(45.0, 6.0), Coord::new(45.1, 6.1));

    let points = client.query_points_of_interest(&bbox).unwrap();
    assert_eq!(
        points,
        vec![PointOfInterest {
            latitude: 45.05,
            longitude: 6.05,
            external_id: 123,
            name: Some("Col Test".to_string()),
            elevation: Some(1800.0),
        }]
    );
    assert_eq!(box_of(&transport.requests.borrow()[0]), bbox);
}

#[test]
fn unparsable_elevation_and_missing_name() {
    let transport = Canned {
        body: concat!(
            r#"{"elements":[{"type":"node","id":123,"lat":45.05,"lon":6.05,"#,
            r#""tags":{"ele":"abc"}}]}"#
        )
        .to_string(),
        requests: RefCell::new(Vec::new()),
    };
    let client = OverpassClient::with_transport(&transport, settings());
    let bbox = BoundingBox::new(Coord::new(45.0, 6.0), Coord::new(45.1, 6.1));

    let points = client.query_points_of_interest(&bbox).unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].elevation, None);
    assert_eq!(points[0].name, None);
}

#[test]
fn passes_crossed_by_a_ride() {
    let passes = vec![
        // On the ride, between the second and third vertex.
        Coord::new(45.3, 6.3),
        // Ten kilometres away.
        Coord::new(45.39, 6.2),
    ];
    let transport = AreaLimited::new(0.3, passes);
    let client = OverpassClient::with_transport(&transport, settings());
    let ride = [
        Coord::new(45.1, 6.1),
        Coord::new(45.2, 6.2),
        Coord::new(45.4, 6.4),
        Coord::new(45.8, 6.5),
    ];

    let points = client.query_points_of_interest(&one_degree_box()).unwrap();
    let crossed: Vec<i64> = points
        .iter()
        .filter(|p| is_near_polyline(&ride, &p.coord(), 100.0))
        .map(|p| p.external_id)
        .collect();
    assert_eq!(crossed, vec![0]);

    let tiles = tiles_visited_by_polyline(&ride, 8);
    assert!(!tiles.is_empty() && tiles.len() <= ride.len());
    assert!(tiles.iter().all(|t| t.zoom == 8));
}
