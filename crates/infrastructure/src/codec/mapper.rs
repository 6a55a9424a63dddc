//! Conversion between wire types and the collection model.
//!
//! Decoding collects warnings for entries it has to drop; encoding is total.

use std::collections::BTreeMap;

use satchel_domain::{
    AuthType, BodyElement, BodyMode, BodyPayload, Collection, CollectionId, CollectionInfo,
    Cookie, DEFAULT_COLLECTION_NAME, DEFAULT_COLLECTION_SCHEMA, Event, EventType, Events, Folder,
    GraphqlPayload, HttpMethod, Item, ItemGroup, Property, PropertyList, Protocol, RawLanguage,
    Request, RequestAuth, RequestBody, Response, SCRIPT_TYPE, Url,
};
use serde_json::Value;
use tracing::warn;

use super::CodecResult;
use super::types::{
    ExecLines, Segments, WireAuth, WireAuthParameters, WireBody, WireBodyOptions,
    WireCollection, WireCookie, WireDescription, WireEvent, WireFile, WireGraphql, WireInfo,
    WireItem, WireProperty, WireRawOptions, WireRequest, WireResponse, WireScript, WireUrl,
    WireUrlParts, WireValue,
};
use super::warning::DecodeWarning;

/// Property type marking form-data file entries.
const FILE_TYPE: &str = "file";

/// Type written for auth parameters that carry none.
const DEFAULT_PARAMETER_TYPE: &str = "string";

/// Wire-to-model conversion with warning collection.
#[derive(Debug, Default)]
pub(super) struct Decoder {
    path: Vec<String>,
    warnings: Vec<DecodeWarning>,
}

impl Decoder {
    pub(super) fn into_warnings(self) -> Vec<DecodeWarning> {
        self.warnings
    }

    fn warn(&mut self, node: &str, message: impl Into<String>) {
        let mut path = self.path.join("/");
        if !node.is_empty() {
            if !path.is_empty() {
                path.push('/');
            }
            path.push_str(node);
        }
        let warning = DecodeWarning::warning(path, message);
        warn!(%warning, "decode warning");
        self.warnings.push(warning);
    }

    pub(super) fn collection(&mut self, wire: WireCollection) -> CodecResult<Collection> {
        let info = Self::info(wire.info);
        self.path.push(info.name.clone());
        let mut collection = Collection::with_info(info);
        for item in wire.item {
            collection.add_item(self.item(item)?)?;
        }
        collection.events = self.events(wire.event);
        collection.variables = self.properties(wire.variable, "variable");
        collection.auth = wire.auth.and_then(|auth| self.auth(auth));
        self.path.pop();
        Ok(collection)
    }

    fn info(wire: WireInfo) -> CollectionInfo {
        let mut info = CollectionInfo::new(
            wire.name
                .unwrap_or_else(|| DEFAULT_COLLECTION_NAME.to_string()),
        );
        info.description = wire.description.and_then(WireDescription::into_text);
        info.postman_id = wire.postman_id.map(CollectionId::new);
        info.exporter_id = wire.exporter_id;
        info.schema = wire
            .schema
            .unwrap_or_else(|| DEFAULT_COLLECTION_SCHEMA.to_string());
        info
    }

    pub(super) fn item(&mut self, wire: WireItem) -> CodecResult<Item> {
        let name = wire.name.unwrap_or_default();
        self.path.push(name.clone());
        let description = wire.description.and_then(WireDescription::into_text);
        let events = self.events(wire.event);

        let item = if let Some(request) = wire.request {
            let mut item = Request::new(name, self.request(request)?);
            item.description = description;
            item.events = events;
            for response in wire.response.unwrap_or_default() {
                let response = self.response(response)?;
                item.add_response(response);
            }
            Item::from(item)
        } else {
            let mut folder = Folder::new(name);
            folder.description = description;
            folder.events = events;
            folder.auth = wire.auth.and_then(|auth| self.auth(auth));
            for child in wire.item.unwrap_or_default() {
                folder.add_item(self.item(child)?)?;
            }
            Item::from(folder)
        };
        self.path.pop();
        Ok(item)
    }

    fn request(&mut self, wire: WireRequest) -> CodecResult<RequestBody> {
        let method = match wire.method.as_deref() {
            Some(method) => method.parse::<HttpMethod>()?,
            None => HttpMethod::default(),
        };
        Ok(RequestBody {
            method,
            url: self.url(wire.url),
            header: self.properties(wire.header, "header"),
            body: wire.body.and_then(|body| self.body(body)),
            auth: wire.auth.and_then(|auth| self.auth(auth)),
            description: wire.description.and_then(WireDescription::into_text),
        })
    }

    fn url(&mut self, wire: WireUrl) -> Url {
        match wire {
            WireUrl::Raw(raw) => self.parse_url(raw),
            WireUrl::Structured(parts) if parts.host.is_none() && parts.path.is_none() => {
                self.parse_url(parts.raw.unwrap_or_default())
            }
            WireUrl::Structured(parts) => self.url_parts(parts),
        }
    }

    fn parse_url(&mut self, raw: String) -> Url {
        match Url::parse(raw.as_str()) {
            Ok(url) => url,
            Err(err) => {
                self.warn("url", format!("{err}; keeping raw text"));
                Url::with_raw_unparsed(raw)
            }
        }
    }

    fn url_parts(&mut self, parts: WireUrlParts) -> Url {
        let WireUrlParts {
            raw,
            protocol,
            host,
            port,
            path,
            query,
            variable,
        } = parts;
        let has_raw = raw.is_some();
        let mut url = Url::with_raw_unparsed(raw.unwrap_or_default());
        url.protocol = protocol.and_then(|protocol| match protocol.parse::<Protocol>() {
            Ok(protocol) => Some(protocol),
            Err(err) => {
                self.warn("url", err.to_string());
                None
            }
        });
        url.host = host.map(|h| h.into_segments('.')).unwrap_or_default();
        url.port = port;
        url.path = path.map(|p| p.into_segments('/')).unwrap_or_default();
        url.query = self.properties(query, "url/query");
        for entry in variable {
            let Some(variable) = self.property(entry, "url/variable") else {
                continue;
            };
            if let Err(err) = url.add_path_variable(variable) {
                self.warn("url/variable", err.to_string());
            }
        }
        if !has_raw {
            url.refresh_raw();
        }
        url
    }

    fn properties(&mut self, entries: Vec<WireProperty>, node: &str) -> PropertyList {
        let mut list = PropertyList::new();
        for entry in entries {
            if let Some(property) = self.property(entry, node) {
                // `property` always has a key or a value here
                let _ = list.add(property);
            }
        }
        list
    }

    fn property(&mut self, wire: WireProperty, node: &str) -> Option<Property> {
        let is_file = wire.kind.as_deref() == Some(FILE_TYPE);
        let value = if is_file {
            wire.src.or(wire.value)
        } else {
            wire.value
        }
        .and_then(WireValue::into_text);
        if wire.key.is_none() && value.is_none() {
            self.warn(node, "skipped entry with neither key nor value");
            return None;
        }
        let mut property = Property::from_parts(wire.key, value);
        property.description = wire.description.and_then(WireDescription::into_text);
        property.property_type = wire.kind;
        Some(property)
    }

    fn body(&mut self, wire: WireBody) -> Option<BodyElement> {
        let mode = wire.mode.as_deref().unwrap_or("raw");
        let mode = match mode.parse::<BodyMode>() {
            Ok(mode) => mode,
            Err(err) => {
                self.warn("body", err.to_string());
                return None;
            }
        };
        let payload = match mode {
            BodyMode::Raw | BodyMode::Text => {
                let language = wire
                    .options
                    .and_then(|o| o.raw)
                    .and_then(|r| r.language)
                    .and_then(|language| match language.parse::<RawLanguage>() {
                        Ok(language) => Some(language),
                        Err(err) => {
                            self.warn("body", err.to_string());
                            None
                        }
                    });
                BodyPayload::Raw {
                    content: wire.raw,
                    language,
                }
            }
            BodyMode::Urlencoded => BodyPayload::Urlencoded(
                self.properties(wire.urlencoded.unwrap_or_default(), "body/urlencoded"),
            ),
            BodyMode::Formdata => BodyPayload::Formdata(
                self.properties(wire.formdata.unwrap_or_default(), "body/formdata"),
            ),
            BodyMode::File => BodyPayload::File {
                src: wire.file.and_then(|f| f.src).unwrap_or_default(),
            },
            BodyMode::Graphql => {
                let graphql = wire.graphql.unwrap_or_default();
                BodyPayload::Graphql(GraphqlPayload {
                    query: graphql.query,
                    variables: graphql.variables,
                })
            }
        };
        let mut body = BodyElement::from_payload(payload);
        body.disabled = wire.disabled;
        Some(body)
    }

    fn auth(&mut self, mut wire: WireAuth) -> Option<RequestAuth> {
        let Some(kind) = wire.kind else {
            self.warn("auth", "auth block has no type; dropped");
            return None;
        };
        let auth_type = match kind.parse::<AuthType>() {
            Ok(auth_type) => auth_type,
            Err(err) => {
                self.warn("auth", err.to_string());
                return None;
            }
        };
        let parameters = match wire.parameters.remove(auth_type.as_str()) {
            Some(WireAuthParameters::Entries(entries)) => entries,
            Some(WireAuthParameters::Other(Value::Array(entries))) => {
                let mut parameters = Vec::with_capacity(entries.len());
                for entry in entries {
                    match serde_json::from_value::<WireProperty>(entry) {
                        Ok(entry) => parameters.push(entry),
                        Err(err) => self.warn("auth", format!("skipped parameter: {err}")),
                    }
                }
                parameters
            }
            Some(WireAuthParameters::Other(Value::Null)) | None => Vec::new(),
            Some(WireAuthParameters::Other(_)) => {
                self.warn("auth", format!("{auth_type} parameters are not a list"));
                Vec::new()
            }
        };
        let parameters = self.properties(parameters, "auth");
        Some(RequestAuth::with_parameters(auth_type, parameters))
    }

    fn events(&mut self, wire: Vec<WireEvent>) -> Events {
        let mut events = Events::new();
        for event in wire {
            let listen = match event.listen.parse::<EventType>() {
                Ok(listen) => listen,
                Err(err) => {
                    self.warn("event", err.to_string());
                    continue;
                }
            };
            let lines = match event.script.and_then(|s| s.exec) {
                Some(ExecLines::Lines(lines)) => lines,
                Some(ExecLines::Source(source)) => {
                    source.split('\n').map(str::to_owned).collect()
                }
                None => Vec::new(),
            };
            events.set(Event::from_lines(listen, lines));
        }
        events
    }

    fn response(&mut self, wire: WireResponse) -> CodecResult<Response> {
        let name = wire.name.unwrap_or_default();
        self.path.push(name.clone());
        let original_request = match wire.original_request {
            Some(request) => Some(self.request(request)?),
            None => None,
        };
        let header = self.properties(wire.header.unwrap_or_default(), "header");
        let cookie = wire.cookie.into_iter().map(|c| self.cookie(c)).collect();
        self.path.pop();

        let mut response = Response::new(name, 0, "");
        response.status = wire.status;
        response.code = wire.code;
        response.original_request = original_request;
        response.preview_language = wire.preview_language;
        response.header = header;
        response.cookie = cookie;
        response.body = wire.body;
        Ok(response)
    }

    fn cookie(&mut self, wire: WireCookie) -> Cookie {
        let mut cookie = Cookie::default();
        cookie.name = wire.name;
        cookie.value = wire.value;
        cookie.domain = wire.domain;
        cookie.path = wire.path;
        cookie.expires = wire.expires;
        cookie.max_age = wire.max_age;
        cookie.host_only = wire.host_only;
        cookie.http_only = wire.http_only;
        cookie.secure = wire.secure;
        cookie.session = wire.session;
        cookie.extensions = self.properties(wire.extensions, "cookie");
        cookie
    }
}

pub(super) fn encode_collection(collection: &Collection) -> WireCollection {
    let info = &collection.info;
    WireCollection {
        info: WireInfo {
            postman_id: info.postman_id.as_ref().map(ToString::to_string),
            name: Some(info.name.clone()),
            description: info.description.clone().map(WireDescription::Text),
            schema: Some(info.schema.clone()),
            exporter_id: info.exporter_id.clone(),
        },
        item: collection.children().iter().map(encode_item).collect(),
        event: encode_events(&collection.events),
        variable: encode_properties(&collection.variables),
        auth: collection.auth.as_ref().map(encode_auth),
    }
}

pub(super) fn encode_item(item: &Item) -> WireItem {
    match item {
        Item::Folder(folder) => WireItem {
            name: Some(folder.name.clone()),
            description: folder.description.clone().map(WireDescription::Text),
            item: Some(folder.children().iter().map(encode_item).collect()),
            event: encode_events(&folder.events),
            auth: folder.auth.as_ref().map(encode_auth),
            ..WireItem::default()
        },
        Item::Request(request) => WireItem {
            name: Some(request.name.clone()),
            description: request.description.clone().map(WireDescription::Text),
            event: encode_events(&request.events),
            request: Some(encode_request(&request.request)),
            response: Some(request.responses.iter().map(encode_response).collect()),
            ..WireItem::default()
        },
    }
}

pub(super) fn encode_request(request: &RequestBody) -> WireRequest {
    WireRequest {
        auth: request.auth.as_ref().map(encode_auth),
        method: Some(request.method.as_str().to_string()),
        header: encode_properties(&request.header),
        body: request.body.as_ref().map(encode_body),
        url: encode_url(&request.url),
        description: request.description.clone().map(WireDescription::Text),
    }
}

/// URLs without derived components are written as their raw string.
pub(super) fn encode_url(url: &Url) -> WireUrl {
    if url.protocol.is_none()
        && url.host.is_empty()
        && url.path.is_empty()
        && url.port.is_none()
        && url.query.is_empty()
        && url.variable.is_empty()
    {
        return WireUrl::Raw(url.raw().to_string());
    }
    WireUrl::Structured(WireUrlParts {
        raw: Some(url.raw().to_string()),
        protocol: url.protocol.map(|protocol| protocol.as_str().to_string()),
        host: (!url.host.is_empty()).then(|| Segments::List(url.host.clone())),
        port: url.port.clone(),
        path: (!url.path.is_empty()).then(|| Segments::List(url.path.clone())),
        query: encode_properties(&url.query),
        variable: encode_properties(&url.variable),
    })
}

pub(super) fn encode_properties(list: &PropertyList) -> Vec<WireProperty> {
    list.iter().map(encode_property).collect()
}

pub(super) fn encode_property(property: &Property) -> WireProperty {
    let value = property.value().map(|value| {
        if property.is_boolean_literal() {
            WireValue::Bool(value == "true")
        } else {
            WireValue::Text(value.to_string())
        }
    });
    let is_file = property.property_type.as_deref() == Some(FILE_TYPE);
    let (value, src) = if is_file { (None, value) } else { (value, None) };
    WireProperty {
        key: property.key().map(str::to_owned),
        value,
        src,
        description: property.description.clone().map(WireDescription::Text),
        kind: property.property_type.clone(),
    }
}

pub(super) fn encode_body(body: &BodyElement) -> WireBody {
    let mut wire = WireBody {
        mode: Some(body.mode().as_str().to_string()),
        disabled: body.disabled,
        ..WireBody::default()
    };
    match body.payload() {
        BodyPayload::Raw { content, language } => {
            wire.raw = Some(content.clone().unwrap_or_default());
            wire.options = language.map(|language| WireBodyOptions {
                raw: Some(WireRawOptions {
                    language: Some(language.as_str().to_string()),
                }),
            });
        }
        BodyPayload::Urlencoded(fields) => wire.urlencoded = Some(encode_properties(fields)),
        BodyPayload::Formdata(fields) => wire.formdata = Some(encode_properties(fields)),
        BodyPayload::File { src } => {
            wire.file = Some(WireFile {
                src: Some(src.clone()),
            });
        }
        BodyPayload::Graphql(graphql) => {
            wire.graphql = Some(WireGraphql {
                query: graphql.query.clone(),
                variables: graphql.variables.clone(),
            });
        }
    }
    wire
}

pub(super) fn encode_auth(auth: &RequestAuth) -> WireAuth {
    let mut parameters = BTreeMap::new();
    if auth.auth_type() != AuthType::NoAuth {
        let entries = auth
            .parameters()
            .iter()
            .map(|parameter| {
                let mut entry = encode_property(parameter);
                entry
                    .kind
                    .get_or_insert_with(|| DEFAULT_PARAMETER_TYPE.to_string());
                entry
            })
            .collect();
        parameters.insert(
            auth.auth_type().as_str().to_string(),
            WireAuthParameters::Entries(entries),
        );
    }
    WireAuth {
        kind: Some(auth.auth_type().as_str().to_string()),
        parameters,
    }
}

pub(super) fn encode_events(events: &Events) -> Vec<WireEvent> {
    events.iter().map(encode_event).collect()
}

pub(super) fn encode_event(event: &Event) -> WireEvent {
    WireEvent {
        listen: event.listen().as_str().to_string(),
        script: Some(WireScript {
            kind: Some(SCRIPT_TYPE.to_string()),
            exec: Some(ExecLines::Lines(event.lines().to_vec())),
        }),
    }
}

pub(super) fn encode_response(response: &Response) -> WireResponse {
    WireResponse {
        name: Some(response.name.clone()),
        original_request: response.original_request.as_ref().map(encode_request),
        status: response.status.clone(),
        code: response.code,
        preview_language: response.preview_language.clone(),
        header: Some(encode_properties(&response.header)),
        cookie: response.cookie.iter().map(encode_cookie).collect(),
        body: response.body.clone(),
    }
}

fn encode_cookie(cookie: &Cookie) -> WireCookie {
    WireCookie {
        domain: cookie.domain.clone(),
        expires: cookie.expires.clone(),
        max_age: cookie.max_age.clone(),
        host_only: cookie.host_only,
        http_only: cookie.http_only,
        name: cookie.name.clone(),
        path: cookie.path.clone(),
        secure: cookie.secure,
        session: cookie.session,
        value: cookie.value.clone(),
        extensions: encode_properties(&cookie.extensions),
    }
}
