use warp_node::{
    BinaryNodeError, Node, NodeContent, decode, decode_packed, encode, encode_optional, render,
    token, unpack,
};

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;

fn round_trip(node: &Node) -> anyhow::Result<Node> {
    let bytes = encode(node)?;
    decode(&bytes)?.ok_or_else(|| anyhow::anyhow!("decoded to absent"))
}

#[test]
fn round_trip_across_node_shapes() -> anyhow::Result<()> {
    let shapes = [
        Node::new("ping"),
        Node::new("presence").with_attr("type", "available"),
        Node::new("iq")
            .with_attr("id", "77")
            .with_attr("type", "set")
            .with_attr("xmlns", "w:m")
            .with_attr("to", "s.whatsapp.net"),
        Node::new("chatstate").with_text("composing"),
        Node::new("enc").with_bytes(vec![0x17, 0x92, 0xFF, 0x00, 0x41]),
        Node::new("receipt").with_children(vec![Node::new("item")]),
        Node::new("query").with_children(vec![
            Node::new("contact").with_attr("jid", "111@s.whatsapp.net"),
            Node::new("contact").with_attr("jid", "222@s.whatsapp.net"),
            Node::new("contact").with_attr("jid", "333@g.us"),
        ]),
    ];

    for node in &shapes {
        assert!(node.is_well_formed());
        assert_eq!(&round_trip(node)?, node, "shape {}", node.tag);
    }
    Ok(())
}

#[test]
fn absent_content_encodes_like_an_empty_child_list() -> anyhow::Result<()> {
    let absent = Node::new("message").with_attr("id", "9");
    let mut empty_list = absent.clone();
    empty_list.content = NodeContent::Nodes(Vec::new());

    assert_eq!(encode(&absent)?, encode(&empty_list)?);
    // Both decode to the canonical absent-content form.
    assert_eq!(round_trip(&empty_list)?.content, NodeContent::None);
    Ok(())
}

#[test]
fn top_level_absence_is_one_empty_list_byte() -> anyhow::Result<()> {
    let bytes = encode_optional(None)?;
    assert_eq!(bytes, [token::LIST_EMPTY]);
    assert_eq!(decode(&bytes)?, None);
    Ok(())
}

#[test]
fn attribute_order_survives_the_round_trip() -> anyhow::Result<()> {
    let node = Node::new("notification")
        .with_attr("zeta", "1")
        .with_attr("alpha", "2")
        .with_attr("mid", "3");
    let decoded = round_trip(&node)?;
    let keys: Vec<&str> = decoded.attrs.keys().map(String::as_str).collect();
    assert_eq!(keys, ["zeta", "alpha", "mid"]);
    Ok(())
}

#[test]
fn wide_attribute_maps_take_the_sixteen_bit_header() -> anyhow::Result<()> {
    let mut node = Node::new("props");
    for index in 0..200 {
        node.attrs.insert(format!("k{index}"), format!("v{index}"));
    }
    assert!(node.list_size() >= 256);

    let bytes = encode(&node)?;
    assert_eq!(bytes[0], token::LIST_16);
    assert_eq!(round_trip(&node)?, node);
    Ok(())
}

#[test]
fn payload_length_class_boundaries_round_trip() -> anyhow::Result<()> {
    for len in [0usize, 1, 255, 256, (1 << 20) - 1, 1 << 20] {
        let payload: Vec<u8> = (0..len).map(|index| (index % 251) as u8).collect();
        let node = Node::new("enc").with_bytes(payload.clone());
        let decoded = round_trip(&node)?;
        assert_eq!(decoded.content, NodeContent::Bytes(payload.into()), "len {len}");
    }
    Ok(())
}

#[test]
fn address_attributes_use_the_pair_form() -> anyhow::Result<()> {
    let node = Node::new("receipt")
        .with_attr("from", "1234567890@s.whatsapp.net")
        .with_attr("participant", "broadcast");
    let bytes = encode(&node)?;
    assert!(bytes.contains(&token::JID_PAIR));

    let decoded = round_trip(&node)?;
    assert_eq!(decoded.attr("from"), Some("1234567890@s.whatsapp.net"));
    assert_eq!(decoded.attr("participant"), Some("broadcast"));
    Ok(())
}

#[test]
fn truncated_payloads_always_underrun() -> anyhow::Result<()> {
    let nodes = [
        Node::new("ping"),
        Node::new("iq").with_attr("id", "1").with_attr("type", "get"),
        Node::new("body").with_text("paused"),
        Node::new("enc").with_bytes(vec![0xAB; 300]),
        Node::new("usync").with_children(vec![
            Node::new("list").with_children(vec![Node::new("user").with_attr("jid", "9@g.us")]),
            Node::new("side_list_extra"),
        ]),
    ];

    for node in &nodes {
        let bytes = encode(node)?;
        for cut in 1..=bytes.len().min(4) {
            let truncated = &bytes[..bytes.len() - cut];
            assert_eq!(
                decode(truncated).unwrap_err(),
                BinaryNodeError::BufferUnderrun,
                "node {} cut {cut}",
                node.tag
            );
        }
    }
    Ok(())
}

#[test]
fn attributes_never_swallow_trailing_string_content() -> anyhow::Result<()> {
    // One attribute pair plus a single string content item: the greedy
    // attribute scan must stop with one budget item left.
    let node = Node::new("chatstate")
        .with_attr("from", "42@s.whatsapp.net")
        .with_text("composing");
    let decoded = round_trip(&node)?;
    assert_eq!(decoded.attrs.len(), 1);
    assert_eq!(decoded.content, NodeContent::Text("composing".into()));
    Ok(())
}

#[test]
fn query_scenario_round_trips_and_renders() -> anyhow::Result<()> {
    let node = Node::new("iq")
        .with_attr("id", "1")
        .with_attr("type", "get")
        .with_children(vec![Node::new("query")]);

    assert_eq!(round_trip(&node)?, node);
    assert_eq!(render(&node), "<iq id=\"1\" type=\"get\">\n  <query />\n</iq>");
    Ok(())
}

#[test]
fn packed_payloads_decode_through_the_flag_byte() -> anyhow::Result<()> {
    let node = Node::new("notification")
        .with_attr("type", "account_sync")
        .with_children(vec![Node::new("props").with_attr("version", "8")]);
    let raw = encode(&node)?;

    let mut plain = vec![0x00];
    plain.extend_from_slice(&raw);
    assert_eq!(decode_packed(&plain)?, Some(node.clone()));

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&raw)?;
    let mut compressed = vec![warp_node::unpack::FLAG_COMPRESSED];
    compressed.extend_from_slice(&encoder.finish()?);
    assert_eq!(unpack(&compressed)?.as_ref(), raw.as_slice());
    assert_eq!(decode_packed(&compressed)?, Some(node));
    Ok(())
}
