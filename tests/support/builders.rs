// tests/support/builders.rs
use serde_json::{Value, json};
use store_locator::application::commands::stores::CreateStoreCommand;

pub struct StoreRequestBuilder {
    name: String,
    description: Option<String>,
    tags: Vec<String>,
    lng: f64,
    lat: f64,
    address: String,
}

impl StoreRequestBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            tags: Vec::new(),
            lng: -79.3832,
            lat: 43.6532,
            address: "1 Front St, Toronto".into(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn at(mut self, lng: f64, lat: f64) -> Self {
        self.lng = lng;
        self.lat = lat;
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn command(self) -> CreateStoreCommand {
        let mut builder = CreateStoreCommand::builder()
            .name(self.name)
            .coordinates(self.lng, self.lat)
            .address(self.address);
        if let Some(description) = self.description {
            builder = builder.description(description);
        }
        for tag in self.tags {
            builder = builder.tag(tag);
        }
        builder.build().expect("complete store command")
    }

    pub fn json(self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "tags": self.tags,
            "location": {
                "type": "Point",
                "coordinates": [self.lng, self.lat],
                "address": self.address,
            },
        })
    }
}
