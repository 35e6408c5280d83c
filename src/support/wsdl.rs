//! Published service contract of the availability responder.
//!
//! The codec in [`super::soap_envelope`] must stay in step with this
//! document: element names, their order and the unbounded `room` list.

use super::soap_envelope::AVAILABILITY_NS;

/// Path the responder is mounted on (also the WSDL location)
pub const SOAP_ENDPOINT_PATH: &str = "/wsdl";

/// SOAPAction advertised for `checkAvailability`
pub const CHECK_AVAILABILITY_ACTION: &str = "checkAvailability";

/// Render the WSDL with `location` as the service address.
pub fn availability_wsdl(location: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<definitions name="AvailabilityService" targetNamespace="{ns}"
    xmlns:tns="{ns}" xmlns:xsd="http://www.w3.org/2001/XMLSchema"
    xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/" xmlns="http://schemas.xmlsoap.org/wsdl/">

    <types>
        <xsd:schema targetNamespace="{ns}">
            <xsd:element name="checkAvailability">
                <xsd:complexType>
                    <xsd:sequence>
                        <xsd:element name="startDate" type="xsd:date"/>
                        <xsd:element name="endDate" type="xsd:date"/>
                        <xsd:element name="roomType" type="xsd:string"/>
                    </xsd:sequence>
                </xsd:complexType>
            </xsd:element>

            <xsd:element name="checkAvailabilityResponse">
                <xsd:complexType>
                    <xsd:sequence>
                        <xsd:element name="rooms">
                            <xsd:complexType>
                                <xsd:sequence>
                                    <xsd:element name="room" minOccurs="0" maxOccurs="unbounded">
                                        <xsd:complexType>
                                            <xsd:sequence>
                                                <xsd:element name="room_id" type="xsd:int"/>
                                                <xsd:element name="room_type" type="xsd:string"/>
                                                <xsd:element name="available_date" type="xsd:dateTime"/>
                                                <xsd:element name="status" type="xsd:string"/>
                                            </xsd:sequence>
                                        </xsd:complexType>
                                    </xsd:element>
                                </xsd:sequence>
                            </xsd:complexType>
                        </xsd:element>
                    </xsd:sequence>
                </xsd:complexType>
            </xsd:element>
        </xsd:schema>
    </types>

    <message name="checkAvailabilityRequest">
        <part name="parameters" element="tns:checkAvailability"/>
    </message>
    <message name="checkAvailabilityResponse">
        <part name="parameters" element="tns:checkAvailabilityResponse"/>
    </message>

    <portType name="AvailabilityPort">
        <operation name="checkAvailability">
            <input message="tns:checkAvailabilityRequest"/>
            <output message="tns:checkAvailabilityResponse"/>
        </operation>
    </portType>

    <binding name="AvailabilityBinding" type="tns:AvailabilityPort">
        <soap:binding style="document" transport="http://schemas.xmlsoap.org/soap/http"/>
        <operation name="checkAvailability">
            <soap:operation soapAction="{action}"/>
            <input>
                <soap:body use="literal"/>
            </input>
            <output>
                <soap:body use="literal"/>
            </output>
        </operation>
    </binding>

    <service name="AvailabilityService">
        <port name="AvailabilityPort" binding="tns:AvailabilityBinding">
            <soap:address location="{location}"/>
        </port>
    </service>
</definitions>
"#,
        ns = AVAILABILITY_NS,
        action = CHECK_AVAILABILITY_ACTION,
        location = location,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::xml_tree::XmlElement;

    const WSDL_NS: &str = "http://schemas.xmlsoap.org/wsdl/";

    #[test]
    fn wsdl_is_well_formed_and_points_at_location() {
        let wsdl = availability_wsdl("http://localhost:3001/wsdl");
        let doc = XmlElement::parse(&wsdl).unwrap();
        assert!(doc.is(WSDL_NS, "definitions"));
        assert!(wsdl.contains(r#"location="http://localhost:3001/wsdl""#));
    }

    #[test]
    fn request_schema_lists_fields_in_wire_order() {
        let wsdl = availability_wsdl("http://x/wsdl");
        let start = wsdl.find(r#"name="startDate""#).unwrap();
        let end = wsdl.find(r#"name="endDate""#).unwrap();
        let room_type = wsdl.find(r#"name="roomType""#).unwrap();
        assert!(start < end && end < room_type);
    }
}
