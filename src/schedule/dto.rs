use super::model::{Event, Seat, SeatsAvailable};
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct ScheduleResponse {
    pub events: Vec<EventResponse>,
}

impl ScheduleResponse {
    pub fn to_models(&self) -> Vec<Event> {
        self.events.iter().map(EventResponse::to_model).collect()
    }
}

// Note: text fields use the lenient deserializer so a null or missing value reads as empty
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    #[serde(default, deserialize_with = "deserialize_str")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub start: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_btreemap")]
    pub seats_available: BTreeMap<String, Value>,
    #[serde(default)]
    pub background_color: Option<String>,
}

impl EventResponse {
    #[tracing::instrument(skip(self), fields(self.title = %self.title, self.start = %self.start))]
    pub fn to_model(&self) -> Event {
        Event {
            title: self.title.to_string(),
            start: self.start.to_string(),
            description: self.description.to_string(),
            seats_available: Self::get_seats(&self.seats_available),
            background_color: self
                .background_color
                .clone()
                .filter(|color| !color.is_empty()),
        }
    }

    fn get_seats(seats: &BTreeMap<String, Value>) -> SeatsAvailable {
        let mut available = SeatsAvailable::default();

        for (key, value) in seats {
            let Some(seat) = Seat::from_key(key) else {
                continue;
            };

            match value {
                Value::Bool(flag) => available.set(seat, *flag),
                other => warn!(
                    "Seat '{}' has a non-boolean flag ({}), marking it unavailable",
                    key, other
                ),
            }
        }

        available
    }
}

fn deserialize_btreemap<'de, D, T>(d: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Object(_) => BTreeMap::deserialize(value).unwrap_or(BTreeMap::new()),
        _ => BTreeMap::new(),
    })
}

fn deserialize_str<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s.parse().map_err(de::Error::custom)?,
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn should_deserialize_schedule() {
        let dto = serde_json::from_str::<ScheduleResponse>(
            r##"
              {
                "events": [
                  {
                    "title": "Red Sox vs Rays",
                    "description": "Giants versus Rays at 01:05PM on Sunday, February 23rd, 2025",
                    "seatsAvailable": {
                      "s103a6": true,
                      "s103b5": false,
                      "s103b6": true,
                      "s103b7": false
                    },
                    "start": "2025-02-23",
                    "backgroundColor": "#ffa500"
                  }
                ]
              }"##,
        );

        assert!(dto.is_ok(), "{:?}", dto);

        let events = dto.unwrap().to_models();

        assert_eq!(events.len(), 1);

        let event = events.first().unwrap();

        assert_eq!(event.title, "Red Sox vs Rays");
        assert_eq!(event.start, "2025-02-23");
        assert_eq!(event.background_color.as_deref(), Some("#ffa500"));
        assert_eq!(
            event.seats_available,
            SeatsAvailable {
                s103a6: true,
                s103b5: false,
                s103b6: true,
                s103b7: false,
            }
        );
    }

    #[test_log::test]
    fn when_seats_are_missing_or_unknown_should_be_unavailable() {
        let dto = serde_json::from_str::<ScheduleResponse>(
            r##"
              {
                "events": [
                  {
                    "title": "Cubs",
                    "description": "",
                    "seatsAvailable": { "s103b6": true, "s999z9": true, "s103a6": "available" },
                    "start": "2025-03-01"
                  },
                  {
                    "title": "Dodgers",
                    "start": "2025-03-02"
                  }
                ]
              }"##,
        )
        .unwrap();

        let events = dto.to_models();

        assert_eq!(events[0].seats_available.available_count(), 1);
        assert!(events[0].seats_available.s103b6);
        assert!(!events[0].seats_available.s103a6);
        assert_eq!(events[1].seats_available, SeatsAvailable::default());
        assert_eq!(events[1].description, "");
        assert_eq!(events[1].background_color, None);
    }

    #[test_log::test]
    fn when_events_field_is_missing_should_fail() {
        let dto = serde_json::from_str::<ScheduleResponse>(r#"{ "games": [] }"#);

        assert!(dto.is_err());
    }
}
