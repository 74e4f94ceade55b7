//! Adapter: a client that only understands JSON objects, a legacy service that
//! only speaks XML, and an adapter that wraps the latter to look like the
//! former.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{json, Map, Value};

use crate::error::{PatternError, Result};

/// Anything the client can be handed. Capabilities are discovered at runtime
/// through `as_target`, which is `None` for services that cannot serve a
/// [`Target::request`].
pub trait Service {
    fn name(&self) -> &str;

    fn as_target(&self) -> Option<&dyn Target> {
        None
    }
}

/// The interface the client code works with.
pub trait Target {
    fn request(&self) -> Result<Value>;
}

// =============================================================================
// Services
// =============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct TargetService;

impl Target for TargetService {
    fn request(&self) -> Result<Value> {
        Ok(json!({"json_data": {"some_critical_data": "very_much_business_value"}}))
    }
}

impl Service for TargetService {
    fn name(&self) -> &str {
        "Target"
    }

    fn as_target(&self) -> Option<&dyn Target> {
        Some(self)
    }
}

pub const ADAPTEE_PAYLOAD: &[u8] =
    b"<xml_data><some_critical_data>very_much_business_value</some_critical_data></xml_data>";

/// Useful, but incompatible: hands out XML bytes instead of JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct Adaptee;

impl Adaptee {
    pub fn specific_request(&self) -> &'static [u8] {
        ADAPTEE_PAYLOAD
    }
}

impl Service for Adaptee {
    fn name(&self) -> &str {
        "Adaptee"
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Adapter {
    adaptee: Adaptee,
}

impl Adapter {
    pub fn new(adaptee: Adaptee) -> Self {
        Adapter { adaptee }
    }
}

impl Target for Adapter {
    fn request(&self) -> Result<Value> {
        let payload = self.adaptee.specific_request();
        tracing::debug!(bytes = payload.len(), "converting adaptee XML payload");
        xml_to_value(payload)
    }
}

impl Service for Adapter {
    fn name(&self) -> &str {
        "Adapter"
    }

    fn as_target(&self) -> Option<&dyn Target> {
        Some(self)
    }
}

/// Requests data from `service` and checks it is a JSON object.
pub fn client_code(service: &dyn Service) -> Result<Map<String, Value>> {
    let target = service
        .as_target()
        .ok_or_else(|| PatternError::missing_capability(service.name(), "request"))?;

    match target.request()? {
        Value::Object(data) => Ok(data),
        _ => Err(PatternError::UnsupportedFormat),
    }
}

// =============================================================================
// XML -> JSON conversion
// =============================================================================

/// One open element while walking the document.
struct Frame {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let mut children = Map::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|err| PatternError::Xml(err.to_string()))?;
            let value = attr
                .unescape_value()
                .map_err(|err| PatternError::Xml(err.to_string()))?;
            children.insert(
                format!("@{}", String::from_utf8_lossy(attr.key.as_ref())),
                Value::String(value.into_owned()),
            );
        }

        Ok(Frame {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            children,
            text: String::new(),
        })
    }

    fn close(self) -> (String, Value) {
        let value = match (self.children.is_empty(), self.text.is_empty()) {
            (true, true) => Value::Null,
            (true, false) => Value::String(self.text),
            (false, true) => Value::Object(self.children),
            (false, false) => {
                let mut children = self.children;
                children.insert("#text".to_owned(), Value::String(self.text));
                Value::Object(children)
            }
        };
        (self.name, value)
    }
}

/// Repeated element names turn into arrays.
fn insert_child(parent: &mut Map<String, Value>, name: String, value: Value) {
    match parent.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            parent.insert(name, value);
        }
    }
}

/// Converts an XML document into a JSON object keyed by the root element.
///
/// Text-only elements become strings, attributes become `@name` keys, mixed
/// text becomes `#text`, repeated children become arrays and empty elements
/// become `null`.
pub fn xml_to_value(xml: &[u8]) -> Result<Value> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Map<String, Value>> = None;

    loop {
        let event = reader.read_event_into(&mut buf)?;
        let closed = match event {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(PatternError::Xml("junk after document element".into()));
                }
                stack.push(Frame::open(&start)?);
                None
            }
            Event::Empty(start) => {
                if root.is_some() {
                    return Err(PatternError::Xml("junk after document element".into()));
                }
                Some(Frame::open(&start)?)
            }
            Event::End(_) => stack.pop(),
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|err| PatternError::Xml(err.to_string()))?;
                match stack.last_mut() {
                    Some(frame) => frame.text.push_str(&text),
                    None => {
                        return Err(PatternError::Xml(format!(
                            "text outside of an element: {text}"
                        )))
                    }
                }
                None
            }
            Event::CData(data) => {
                let data = String::from_utf8_lossy(&data);
                match stack.last_mut() {
                    Some(frame) => frame.text.push_str(&data),
                    None => {
                        return Err(PatternError::Xml(format!(
                            "CDATA outside of an element: {data}"
                        )))
                    }
                }
                None
            }
            Event::Eof => break,
            _ => None,
        };

        if let Some(frame) = closed {
            let (name, value) = frame.close();
            match stack.last_mut() {
                Some(parent) => insert_child(&mut parent.children, name, value),
                None => {
                    let mut document = Map::new();
                    document.insert(name, value);
                    root = Some(document);
                }
            }
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(PatternError::Xml(format!("unclosed element <{}>", open.name)));
    }
    root.map(Value::Object)
        .ok_or_else(|| PatternError::Xml("document has no root element".into()))
}
