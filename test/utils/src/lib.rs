/// Body of a successful `/api/ai/chat` call, with synthesized audio.
pub fn chat_reply_fixture() -> &'static str {
    return r#"
{
    "message": "Entendo. A ansiedade pode ser muito pesada. Quer me contar o que está acontecendo?",
    "message_id": 100,
    "tokens_used": 57,
    "timestamp": "2024-05-01T10:00:05.123456",
    "therapist_profile": "psicologo",
    "has_audio": true,
    "audio_url": "/api/audio/download/ai_response_1a2b3c4d.mp3"
}
"#
    .trim();
}

/// A WAV header without samples, good enough to stand in for a recording.
pub fn wav_fixture() -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&36u32.to_le_bytes());
    bytes.extend_from_slice(b"WAVEfmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&16000u32.to_le_bytes());
    bytes.extend_from_slice(&32000u32.to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&0u32.to_le_bytes());

    return bytes;
}
