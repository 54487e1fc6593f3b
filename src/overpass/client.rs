use tracing::{debug, info, warn};

use super::OverpassClient;
use crate::{
    error::{Error, Result},
    http::{HttpRequest, HttpTransport, RequestBody},
    types::{BoundingBox, OverpassResponse, PointOfInterest},
};

/// What a single Overpass exchange told us about one box.
#[derive(Debug, Clone, PartialEq)]
pub enum BoxOutcome {
    Points(Vec<PointOfInterest>),
    /// 429, the box has to be split.
    RateLimited,
}

/// The `poly:"..."` filter for `bbox`, corners NW, NE, SE, SW as "lat lon" pairs.
pub fn poly_filter(bbox: &BoundingBox) -> String {
    let points = bbox
        .corners()
        .iter()
        .map(|c| format!("{} {}", c.lat, c.lon))
        .collect::<Vec<String>>()
        .join(" ");
    format!("poly:\"{}\"", points)
}

/// Overpass QL selecting mountain passes and saddles inside `bbox`.
pub fn build_pass_query(bbox: &BoundingBox, timeout_hint_secs: u32) -> String {
    let poly = poly_filter(bbox);
    format!(
        "[out:json][timeout:{timeout_hint_secs}];\n\
         (node[\"mountain_pass\"=\"yes\"]({poly});\n\
         node[\"natural\"=\"saddle\"]({poly});\n\
         );\n\
         out center;"
    )
}

impl<T: HttpTransport> OverpassClient<T> {
    pub fn build_query(&self, bbox: &BoundingBox) -> String {
        build_pass_query(bbox, self.settings.timeout_hint_secs)
    }

    /// Every mountain pass and saddle inside `bbox`.
    ///
    /// Rate limited boxes are split into quadrants (top-left, top-right, bottom-left,
    /// bottom-right) and their results concatenated in that order. Points lying on a
    /// split line may show up twice.
    pub fn query_points_of_interest(&self, bbox: &BoundingBox) -> Result<Vec<PointOfInterest>> {
        let mut points = Vec::new();
        // Explicit stack instead of recursion, children pushed in reverse so they pop in order.
        let mut pending = vec![(*bbox, 0u32)];

        while let Some((current, depth)) = pending.pop() {
            match self.fetch_box(&current)? {
                BoxOutcome::Points(found) => {
                    debug!("Got {} points for {}", found.len(), current);
                    points.extend(found);
                }
                BoxOutcome::RateLimited => {
                    if depth >= self.settings.max_depth {
                        return Err(Error::SubdivisionLimit {
                            depth,
                            bbox: current,
                        });
                    }
                    info!("Too large zone {}, dividing it in 4", current);
                    pending.extend(current.split().into_iter().rev().map(|q| (q, depth + 1)));
                }
            }
        }

        info!("Got {} mountain passes for {}", points.len(), bbox);
        Ok(points)
    }

    /// One box, no subdivision. Statuses other than 200 and 429 are retried
    /// following the configured policy.
    pub fn fetch_box(&self, bbox: &BoundingBox) -> Result<BoxOutcome> {
        let query = self.build_query(bbox);
        debug!("Sending query: {}", query);
        let request = HttpRequest::post(&self.settings.url, RequestBody::Text(query))
            .header("User-Agent", &self.settings.user_agent);

        let retry = &self.settings.retry;
        let mut attempts = 0;
        loop {
            let response = self.transport.send(&request)?;
            attempts += 1;

            match response.status {
                200 => {
                    let parsed: OverpassResponse = serde_json::from_str(&response.body)?;
                    if let Some(remark) = &parsed.remark {
                        warn!("Overpass remark for {}: {}", bbox, remark);
                    }
                    let points = parsed
                        .elements
                        .into_iter()
                        .map(PointOfInterest::from)
                        .collect();
                    return Ok(BoxOutcome::Points(points));
                }
                429 => return Ok(BoxOutcome::RateLimited),
                code => {
                    warn!("ERROR CODE {} from Overpass (attempt {})", code, attempts);
                    if !retry.should_retry(attempts) {
                        return Err(Error::Status {
                            code,
                            url: self.settings.url.clone(),
                        });
                    }
                    let delay = retry.delay_for(attempts);
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                }
            }
        }
    }
}
