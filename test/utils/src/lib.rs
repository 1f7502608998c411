pub fn chat_message_fixture() -> &'static str {
    return r#"
{
    "event": "message",
    "task_id": "c3800678-a077-43df-a102-53f23ed20b88",
    "id": "9da23599-e713-473b-982c-4328d4f5c78a",
    "message_id": "9da23599-e713-473b-982c-4328d4f5c78a",
    "conversation_id": "45701982-8118-4bc5-8e9b-64562b4555f2",
    "mode": "chat",
    "answer": "<think>\nThe user wants a weekend trip from Lyon.\nSuggest something by train.\n</think>\n\nPourquoi pas **Annecy** ? Le lac est magnifique en juin.",
    "metadata": {
        "usage": {
            "prompt_tokens": 1033,
            "prompt_unit_price": "0.001",
            "prompt_price_unit": "0.001",
            "prompt_price": "0.0010330",
            "completion_tokens": 128,
            "completion_unit_price": "0.002",
            "completion_price_unit": "0.001",
            "completion_price": "0.0002560",
            "total_tokens": 1161,
            "total_price": "0.0012890",
            "currency": "USD",
            "latency": 0.7682376249867957
        },
        "retriever_resources": []
    },
    "created_at": 1705407629
}
"#
    .trim();
}

pub fn chat_message_without_answer_fixture() -> &'static str {
    return r#"
{
    "event": "message",
    "message_id": "0b4c3a1e-61a4-4b5f-9a49-3bd0a1f1c8e2",
    "conversation_id": "",
    "metadata": {}
}
"#
    .trim();
}
