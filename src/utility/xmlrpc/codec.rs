// 3rd party crates
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::{Reader, Writer};

// Current module imports
use super::errors::XmlRpcError;
use super::types::{MethodCall, MethodResponse, Value};

impl MethodCall {
    pub fn new(method_name: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method_name: method_name.into(),
            params,
        }
    }

    /// Serializes the call as a UTF-8 `<methodCall>` document.
    pub fn encode(&self) -> Result<String, XmlRpcError> {
        let mut writer: Writer<Vec<u8>> = Writer::new(Vec::new());

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new("methodCall")))?;
        write_text_element(&mut writer, "methodName", &self.method_name)?;
        writer.write_event(Event::Start(BytesStart::new("params")))?;
        for param in &self.params {
            writer.write_event(Event::Start(BytesStart::new("param")))?;
            write_value(&mut writer, param)?;
            writer.write_event(Event::End(BytesEnd::new("param")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("params")))?;
        writer.write_event(Event::End(BytesEnd::new("methodCall")))?;

        String::from_utf8(writer.into_inner()).map_err(|e| XmlRpcError::Malformed(e.to_string()))
    }
}

impl MethodResponse {
    /// Parses a `<methodResponse>` document.
    pub fn decode(body: &str) -> Result<Self, XmlRpcError> {
        ResponseParser::new(body).parse()
    }
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    tag: &str,
    text: &str,
) -> Result<(), XmlRpcError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn write_value(writer: &mut Writer<Vec<u8>>, value: &Value) -> Result<(), XmlRpcError> {
    writer.write_event(Event::Start(BytesStart::new("value")))?;
    match value {
        Value::String(text) => write_text_element(writer, "string", text)?,
        Value::Int(number) => {
            // <int> is 32-bit on the wire; wider values need the i8 extension.
            let tag = if i32::try_from(*number).is_ok() { "int" } else { "i8" };
            write_text_element(writer, tag, &number.to_string())?
        }
        Value::Boolean(flag) => write_text_element(writer, "boolean", if *flag { "1" } else { "0" })?,
        Value::Double(number) => write_text_element(writer, "double", &number.to_string())?,
        Value::Array(items) => {
            writer.write_event(Event::Start(BytesStart::new("array")))?;
            writer.write_event(Event::Start(BytesStart::new("data")))?;
            for item in items {
                write_value(writer, item)?;
            }
            writer.write_event(Event::End(BytesEnd::new("data")))?;
            writer.write_event(Event::End(BytesEnd::new("array")))?;
        }
        Value::Struct(members) => {
            writer.write_event(Event::Start(BytesStart::new("struct")))?;
            for (name, member) in members {
                writer.write_event(Event::Start(BytesStart::new("member")))?;
                write_text_element(writer, "name", name)?;
                write_value(writer, member)?;
                writer.write_event(Event::End(BytesEnd::new("member")))?;
            }
            writer.write_event(Event::End(BytesEnd::new("struct")))?;
        }
        Value::Nil => writer.write_event(Event::Empty(BytesStart::new("nil")))?,
    }
    writer.write_event(Event::End(BytesEnd::new("value")))?;
    Ok(())
}

fn is_tag(name: QName, tag: &str) -> bool {
    name.as_ref() == tag.as_bytes()
}

fn tag_name(name: QName) -> String {
    String::from_utf8_lossy(name.as_ref()).into_owned()
}

fn cdata_text(cdata: BytesCData) -> Result<String, XmlRpcError> {
    String::from_utf8(cdata.into_inner().into_owned())
        .map_err(|e| XmlRpcError::Malformed(format!("CDATA is not UTF-8: {}", e)))
}

fn describe(event: &Event) -> String {
    match event {
        Event::Start(start) => format!("<{}>", tag_name(start.name())),
        Event::End(end) => format!("</{}>", tag_name(end.name())),
        Event::Empty(empty) => format!("<{}/>", tag_name(empty.name())),
        Event::Text(_) | Event::CData(_) => "text".to_string(),
        Event::Eof => "end of document".to_string(),
        _ => "markup".to_string(),
    }
}

fn unexpected(expected: &str, found: &Event) -> XmlRpcError {
    XmlRpcError::Malformed(format!("expected {}, found {}", expected, describe(found)))
}

fn invalid(kind: &'static str, value: String) -> XmlRpcError {
    XmlRpcError::InvalidScalar { kind, value }
}

/// Value of a typed element written as `<tag/>`.
fn empty_value(tag: &str) -> Result<Value, XmlRpcError> {
    match tag {
        "string" | "base64" | "dateTime.iso8601" => Ok(Value::String(String::new())),
        "nil" => Ok(Value::Nil),
        "array" => Ok(Value::Array(Vec::new())),
        "struct" => Ok(Value::Struct(Vec::new())),
        "int" | "i4" | "i8" => Err(invalid("int", String::new())),
        "boolean" => Err(invalid("boolean", String::new())),
        "double" => Err(invalid("double", String::new())),
        other => Err(XmlRpcError::UnsupportedType(other.to_string())),
    }
}

fn fault_from_value(value: Value) -> Result<MethodResponse, XmlRpcError> {
    let Value::Struct(members) = value else {
        return Err(XmlRpcError::Malformed("fault value is not a struct".into()));
    };

    let mut code: Option<i64> = None;
    let mut message: Option<String> = None;
    for (name, member) in members {
        match (name.as_str(), member) {
            ("faultCode", Value::Int(number)) => code = Some(number),
            ("faultString", Value::String(text)) => message = Some(text),
            _ => {}
        }
    }

    match (code, message) {
        (Some(code), Some(message)) => Ok(MethodResponse::Fault { code, message }),
        _ => Err(XmlRpcError::Malformed(
            "fault struct lacks faultCode or faultString".into(),
        )),
    }
}

/// Pull parser over a `<methodResponse>` document.
struct ResponseParser<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> ResponseParser<'a> {
    fn new(body: &'a str) -> Self {
        Self {
            reader: Reader::from_str(body),
        }
    }

    fn parse(mut self) -> Result<MethodResponse, XmlRpcError> {
        self.expect_start("methodResponse")?;

        let response: MethodResponse = match self.next_structural()? {
            Event::Start(start) if is_tag(start.name(), "params") => {
                self.expect_start("param")?;
                let value: Value = self.next_value()?;
                self.expect_end("param")?;
                self.expect_end("params")?;
                MethodResponse::Success(value)
            }
            Event::Start(start) if is_tag(start.name(), "fault") => {
                let value: Value = self.next_value()?;
                self.expect_end("fault")?;
                fault_from_value(value)?
            }
            other => return Err(unexpected("<params> or <fault>", &other)),
        };

        self.expect_end("methodResponse")?;
        Ok(response)
    }

    /// Next event that carries structure. Blank text, comments and prolog are skipped.
    fn next_structural(&mut self) -> Result<Event<'a>, XmlRpcError> {
        loop {
            match self.reader.read_event()? {
                Event::Text(text) if text.iter().all(u8::is_ascii_whitespace) => continue,
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => continue,
                event => return Ok(event),
            }
        }
    }

    fn expect_start(&mut self, tag: &str) -> Result<(), XmlRpcError> {
        match self.next_structural()? {
            Event::Start(start) if is_tag(start.name(), tag) => Ok(()),
            other => Err(unexpected(&format!("<{}>", tag), &other)),
        }
    }

    fn expect_end(&mut self, tag: &str) -> Result<(), XmlRpcError> {
        match self.next_structural()? {
            Event::End(end) if is_tag(end.name(), tag) => Ok(()),
            other => Err(unexpected(&format!("</{}>", tag), &other)),
        }
    }

    /// Reads a complete `<value>` element, including the opening tag.
    fn next_value(&mut self) -> Result<Value, XmlRpcError> {
        match self.next_structural()? {
            Event::Start(start) if is_tag(start.name(), "value") => self.value_body(),
            Event::Empty(empty) if is_tag(empty.name(), "value") => Ok(Value::String(String::new())),
            other => Err(unexpected("<value>", &other)),
        }
    }

    /// Reads the content of a `<value>` whose opening tag was already consumed.
    /// Text without a type element is a string.
    fn value_body(&mut self) -> Result<Value, XmlRpcError> {
        let mut text = String::new();
        loop {
            match self.reader.read_event()? {
                Event::Text(chunk) => text.push_str(&chunk.unescape()?),
                Event::CData(chunk) => text.push_str(&cdata_text(chunk)?),
                Event::Start(start) => {
                    let value: Value = self.typed_value(&tag_name(start.name()))?;
                    self.expect_end("value")?;
                    return Ok(value);
                }
                Event::Empty(empty) => {
                    let value: Value = empty_value(&tag_name(empty.name()))?;
                    self.expect_end("value")?;
                    return Ok(value);
                }
                Event::End(end) if is_tag(end.name(), "value") => return Ok(Value::String(text)),
                Event::Comment(_) | Event::PI(_) => continue,
                other => return Err(unexpected("value content", &other)),
            }
        }
    }

    /// Reads a typed element whose opening tag was already consumed.
    fn typed_value(&mut self, tag: &str) -> Result<Value, XmlRpcError> {
        match tag {
            "string" | "base64" | "dateTime.iso8601" => Ok(Value::String(self.text_until(tag)?)),
            "int" | "i4" | "i8" => {
                let raw: String = self.text_until(tag)?;
                raw.trim()
                    .parse::<i64>()
                    .map(Value::Int)
                    .map_err(|_| invalid("int", raw))
            }
            "boolean" => {
                let raw: String = self.text_until(tag)?;
                match raw.trim() {
                    "1" => Ok(Value::Boolean(true)),
                    "0" => Ok(Value::Boolean(false)),
                    _ => Err(invalid("boolean", raw)),
                }
            }
            "double" => {
                let raw: String = self.text_until(tag)?;
                raw.trim()
                    .parse::<f64>()
                    .map(Value::Double)
                    .map_err(|_| invalid("double", raw))
            }
            "nil" => {
                self.expect_end("nil")?;
                Ok(Value::Nil)
            }
            "array" => self.array_body(),
            "struct" => self.struct_body(),
            other => Err(XmlRpcError::UnsupportedType(other.to_string())),
        }
    }

    fn text_until(&mut self, tag: &str) -> Result<String, XmlRpcError> {
        let mut text = String::new();
        loop {
            match self.reader.read_event()? {
                Event::Text(chunk) => text.push_str(&chunk.unescape()?),
                Event::CData(chunk) => text.push_str(&cdata_text(chunk)?),
                Event::End(end) if is_tag(end.name(), tag) => return Ok(text),
                Event::Comment(_) | Event::PI(_) => continue,
                other => return Err(unexpected(&format!("</{}>", tag), &other)),
            }
        }
    }

    fn array_body(&mut self) -> Result<Value, XmlRpcError> {
        let mut items: Vec<Value> = Vec::new();

        match self.next_structural()? {
            Event::Empty(empty) if is_tag(empty.name(), "data") => {}
            Event::Start(start) if is_tag(start.name(), "data") => loop {
                match self.next_structural()? {
                    Event::Start(item) if is_tag(item.name(), "value") => {
                        items.push(self.value_body()?)
                    }
                    Event::Empty(item) if is_tag(item.name(), "value") => {
                        items.push(Value::String(String::new()))
                    }
                    Event::End(end) if is_tag(end.name(), "data") => break,
                    other => return Err(unexpected("<value>", &other)),
                }
            },
            other => return Err(unexpected("<data>", &other)),
        }

        self.expect_end("array")?;
        Ok(Value::Array(items))
    }

    fn struct_body(&mut self) -> Result<Value, XmlRpcError> {
        let mut members: Vec<(String, Value)> = Vec::new();
        loop {
            match self.next_structural()? {
                Event::Start(start) if is_tag(start.name(), "member") => {
                    self.expect_start("name")?;
                    let name: String = self.text_until("name")?;
                    let value: Value = self.next_value()?;
                    self.expect_end("member")?;
                    members.push((name, value));
                }
                Event::End(end) if is_tag(end.name(), "struct") => {
                    return Ok(Value::Struct(members))
                }
                other => return Err(unexpected("<member>", &other)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_method_call() {
        let call = MethodCall::new(
            "removeSubdomain",
            vec![Value::from("user@loopiaapi"), Value::from("secret")],
        );

        let xml = call.encode().unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<methodName>removeSubdomain</methodName>"));
        assert!(xml.contains(
            "<params><param><value><string>user@loopiaapi</string></value></param>\
             <param><value><string>secret</string></value></param></params>"
        ));
        assert!(xml.ends_with("</methodCall>"));
    }

    #[test]
    fn test_encode_struct_keeps_member_order() {
        let record = Value::Struct(vec![
            ("type".to_string(), Value::from("TXT")),
            ("ttl".to_string(), Value::Int(60)),
            ("priority".to_string(), Value::Int(0)),
        ]);
        let xml = MethodCall::new("m", vec![record]).encode().unwrap();

        assert!(xml.contains(
            "<struct><member><name>type</name><value><string>TXT</string></value></member>\
             <member><name>ttl</name><value><int>60</int></value></member>\
             <member><name>priority</name><value><int>0</int></value></member></struct>"
        ));
    }

    #[test]
    fn test_encode_escapes_text() {
        let xml = MethodCall::new("m", vec![Value::from("a<b & c")])
            .encode()
            .unwrap();

        assert!(xml.contains("<string>a&lt;b &amp; c</string>"));
    }

    #[test]
    fn test_encode_scalars() {
        let xml = MethodCall::new(
            "m",
            vec![
                Value::Boolean(true),
                Value::Int(5_000_000_000),
                Value::Nil,
                Value::Array(vec![Value::Int(1)]),
            ],
        )
        .encode()
        .unwrap();

        assert!(xml.contains("<value><boolean>1</boolean></value>"));
        assert!(xml.contains("<value><i8>5000000000</i8></value>"));
        assert!(xml.contains("<value><nil/></value>"));
        assert!(xml.contains("<array><data><value><int>1</int></value></data></array>"));
    }

    #[test]
    fn test_decode_typed_string() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<methodResponse>
  <params>
    <param>
      <value><string>OK</string></value>
    </param>
  </params>
</methodResponse>"#;

        let response = MethodResponse::decode(body).unwrap();
        assert_eq!(response, MethodResponse::Success(Value::from("OK")));
    }

    #[test]
    fn test_decode_untyped_string() {
        let body = "<methodResponse><params><param><value>AUTH_ERROR</value></param></params></methodResponse>";

        let response = MethodResponse::decode(body).unwrap();
        assert_eq!(response, MethodResponse::Success(Value::from("AUTH_ERROR")));
    }

    #[test]
    fn test_decode_empty_string_forms() {
        for body in [
            "<methodResponse><params><param><value></value></param></params></methodResponse>",
            "<methodResponse><params><param><value/></param></params></methodResponse>",
            "<methodResponse><params><param><value><string/></value></param></params></methodResponse>",
        ] {
            assert_eq!(
                MethodResponse::decode(body).unwrap(),
                MethodResponse::Success(Value::from("")),
                "body: {}",
                body
            );
        }
    }

    #[test]
    fn test_decode_fault() {
        let body = r#"<?xml version="1.0"?>
<methodResponse>
  <fault>
    <value>
      <struct>
        <member><name>faultCode</name><value><int>623</int></value></member>
        <member><name>faultString</name><value><string>Method not allowed</string></value></member>
      </struct>
    </value>
  </fault>
</methodResponse>"#;

        let response = MethodResponse::decode(body).unwrap();
        assert_eq!(
            response,
            MethodResponse::Fault {
                code: 623,
                message: "Method not allowed".to_string()
            }
        );
    }

    #[test]
    fn test_decode_nested_array_and_struct() {
        let body = "<methodResponse><params><param><value><array><data>\
            <value><struct>\
              <member><name>type</name><value><string>TXT</string></value></member>\
              <member><name>ttl</name><value><i4>3600</i4></value></member>\
              <member><name>active</name><value><boolean>1</boolean></value></member>\
            </struct></value>\
            <value><double>1.5</double></value>\
            </data></array></value></param></params></methodResponse>";

        let response = MethodResponse::decode(body).unwrap();
        assert_eq!(
            response,
            MethodResponse::Success(Value::Array(vec![
                Value::Struct(vec![
                    ("type".to_string(), Value::from("TXT")),
                    ("ttl".to_string(), Value::Int(3600)),
                    ("active".to_string(), Value::Boolean(true)),
                ]),
                Value::Double(1.5),
            ]))
        );
    }

    #[test]
    fn test_decode_unescapes_text() {
        let body = "<methodResponse><params><param><value><string>a &amp; b</string></value></param></params></methodResponse>";

        let response = MethodResponse::decode(body).unwrap();
        assert_eq!(response, MethodResponse::Success(Value::from("a & b")));
    }

    #[test]
    fn test_decode_rejects_html() {
        let result = MethodResponse::decode("<html><body>Bad Gateway</body></html>");
        assert!(matches!(result, Err(XmlRpcError::Malformed(_))));
    }

    #[test]
    fn test_decode_rejects_truncated_document() {
        let result = MethodResponse::decode("<methodResponse><params><param><value><string>OK");
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_bad_int() {
        let body = "<methodResponse><params><param><value><int>sixty</int></value></param></params></methodResponse>";
        let result = MethodResponse::decode(body);
        assert!(matches!(
            result,
            Err(XmlRpcError::InvalidScalar { kind: "int", .. })
        ));
    }

    #[test]
    fn test_decode_rejects_unknown_type() {
        let body = "<methodResponse><params><param><value><float>1</float></value></param></params></methodResponse>";
        let result = MethodResponse::decode(body);
        assert!(matches!(result, Err(XmlRpcError::UnsupportedType(t)) if t == "float"));
    }

    #[test]
    fn test_decode_fault_without_code_is_malformed() {
        let body = "<methodResponse><fault><value><struct>\
            <member><name>faultString</name><value>oops</value></member>\
            </struct></value></fault></methodResponse>";
        let result = MethodResponse::decode(body);
        assert!(matches!(result, Err(XmlRpcError::Malformed(_))));
    }
}
